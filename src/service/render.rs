//! HTML страницы сервиса

use crate::models::ColumnEncoder;
use crate::types::{CategoricalColumn, PredictionOutput};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn datalist(encoder: &ColumnEncoder, column: CategoricalColumn) -> String {
    let options: String = encoder
        .categories(column)
        .iter()
        .map(|c| format!("<option value=\"{}\">", escape_html(c)))
        .collect();
    format!("<datalist id=\"{}-options\">{}</datalist>", column.name(), options)
}

/// Форма ввода; подсказки берутся из категорий, известных модели
pub fn index_page(encoder: &ColumnEncoder) -> String {
    let field = |name: &str, label: &str, list: Option<CategoricalColumn>| {
        let list_attr = list
            .map(|c| format!(" list=\"{}-options\"", c.name()))
            .unwrap_or_default();
        format!("<label>{label} <input name=\"{name}\"{list_attr} required></label><br>")
    };

    let datalists: String = CategoricalColumn::ALL
        .iter()
        .map(|c| datalist(encoder, *c))
        .collect();

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Car Price Predictor</title></head><body>\
         <h2>Car Price Predictor</h2>\
         <form action=\"/predict\" method=\"post\">{}{}{}{}{}{}{}<button type=\"submit\">Predict</button></form>{}\
         </body></html>",
        field("brand", "Brand", Some(CategoricalColumn::Brand)),
        field("model", "Model", Some(CategoricalColumn::Model)),
        field("Year", "Year", None),
        field("Kms_Driven", "Kms Driven", None),
        field("fuel_type", "Fuel Type", Some(CategoricalColumn::FuelType)),
        field("city", "City", Some(CategoricalColumn::City)),
        field("owner", "Owner", Some(CategoricalColumn::Owner)),
        datalists,
    )
}

pub fn result_page(output: &PredictionOutput) -> String {
    let r = &output.record;
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Predicted Price</title></head><body>\
         <h2>Predicted Price: <span id=\"price\">{:.2}</span></h2><ul>\
         <li>Brand: <span id=\"brand\">{}</span></li>\
         <li>Model: <span id=\"model\">{}</span></li>\
         <li>Year: <span id=\"year\">{}</span></li>\
         <li>Kms Driven: <span id=\"kms\">{}</span></li>\
         <li>Fuel Type: <span id=\"fuel\">{}</span></li>\
         <li>City: <span id=\"city\">{}</span></li>\
         <li>Owner: <span id=\"owner\">{}</span></li>\
         </ul><a href=\"/\">Back</a></body></html>",
        output.price,
        escape_html(&r.brand),
        escape_html(&r.model),
        r.year,
        r.kms_driven,
        escape_html(&r.fuel_type),
        escape_html(&r.city),
        escape_html(&r.owner),
    )
}

pub fn error_fragment(message: &str) -> String {
    format!("<h3 style='color:red;'>❌ Error: {}</h3>", escape_html(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CarRecord;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn result_shows_two_decimals_and_inputs() {
        let output = PredictionOutput {
            price: 350000.5,
            record: CarRecord {
                brand: "maruti".into(),
                model: "swift".into(),
                year: 2015,
                kms_driven: 45000,
                fuel_type: "Petrol".into(),
                city: "Unknown".into(),
                owner: "1".into(),
            },
        };
        let html = result_page(&output);
        assert!(html.contains("<span id=\"price\">350000.50</span>"));
        assert!(html.contains("<span id=\"kms\">45000</span>"));
        assert!(html.contains("<span id=\"city\">Unknown</span>"));
    }

    #[test]
    fn error_fragment_is_inline_and_escaped() {
        assert_eq!(
            error_fragment("invalid literal for Year: '<x>'"),
            "<h3 style='color:red;'>❌ Error: invalid literal for Year: &#39;&lt;x&gt;&#39;</h3>"
        );
    }
}
