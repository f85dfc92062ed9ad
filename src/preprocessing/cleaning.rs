//! Очистка шумных полей исходной таблицы

/// Цена: пробелы и разделители тысяч убираются, "Ask For Price" считается пропуском
pub fn clean_price(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(',', "");
    if s.is_empty() || s.to_lowercase().contains("ask") {
        return None;
    }
    s.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Пробег: "45,000 kms" -> 45000
pub fn clean_kms(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Год выпуска: целое число, целое в виде дробного или текст с числом
pub fn clean_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}
