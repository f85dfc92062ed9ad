//! Случайный лес регрессионных деревьев

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy)]
struct TreeParams {
    max_depth: Option<usize>,
    min_samples_split: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Дерево регрессии (критерий: уменьшение суммы квадратов ошибок)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegressionTree {
    root: TreeNode,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    score: f64,
}

impl RegressionTree {
    fn fit(X: &Array2<f64>, y: &Array1<f64>, mut indices: Vec<usize>, params: TreeParams) -> Self {
        Self {
            root: Self::build_tree(X, y, &mut indices, 0, params),
        }
    }

    fn build_tree(
        X: &Array2<f64>,
        y: &Array1<f64>,
        indices: &mut [usize],
        depth: usize,
        params: TreeParams,
    ) -> TreeNode {
        let n = indices.len();
        let sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let mean = sum / n as f64;

        let depth_reached = params.max_depth.is_some_and(|d| depth >= d);
        let pure = indices.iter().all(|&i| (y[i] - mean).abs() < 1e-12);
        if depth_reached || n < params.min_samples_split || pure {
            return TreeNode::Leaf { value: mean };
        }

        let Some(best) = Self::find_best_split(X, y, indices, sum) else {
            return TreeNode::Leaf { value: mean };
        };

        // Разделение на месте: левая часть x <= threshold
        let mut split_at = 0;
        for k in 0..n {
            if X[[indices[k], best.feature]] <= best.threshold {
                indices.swap(k, split_at);
                split_at += 1;
            }
        }
        if split_at == 0 || split_at == n {
            return TreeNode::Leaf { value: mean };
        }
        let (left, right) = indices.split_at_mut(split_at);

        TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(Self::build_tree(X, y, left, depth + 1, params)),
            right: Box::new(Self::build_tree(X, y, right, depth + 1, params)),
        }
    }

    /// Перебор всех признаков и порогов между соседними различными значениями.
    ///
    /// Минимизация SSE эквивалентна максимизации `S_l^2/n_l + S_r^2/n_r`.
    fn find_best_split(
        X: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        total_sum: f64,
    ) -> Option<BestSplit> {
        let n = indices.len();
        let parent_score = total_sum * total_sum / n as f64;
        let mut best: Option<BestSplit> = None;
        let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);

        for feature in 0..X.ncols() {
            let first = X[[indices[0], feature]];
            if indices.iter().all(|&i| X[[i, feature]] == first) {
                continue;
            }

            pairs.clear();
            pairs.extend(indices.iter().map(|&i| (X[[i, feature]], y[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            for k in 0..n - 1 {
                left_sum += pairs[k].1;
                if pairs[k].0 == pairs[k + 1].0 {
                    continue;
                }
                let n_left = (k + 1) as f64;
                let n_right = (n - k - 1) as f64;
                let right_sum = total_sum - left_sum;
                let score = left_sum * left_sum / n_left + right_sum * right_sum / n_right;

                let improves = match &best {
                    Some(b) => score > b.score + 1e-9 * b.score.abs().max(1.0),
                    None => score > parent_score + 1e-9 * parent_score.abs().max(1.0),
                };
                if improves {
                    // середина соседних f64 может округлиться к правому значению
                    let mut threshold = (pairs[k].0 + pairs[k + 1].0) / 2.0;
                    if threshold >= pairs[k + 1].0 {
                        threshold = pairs[k].0;
                    }
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        score,
                    });
                }
            }
        }

        best
    }

    fn predict_row(&self, sample: ArrayView1<f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[*feature] <= *threshold { &**left } else { &**right };
                }
            }
        }
    }
}

/// Ансамбль деревьев на бутстрэп-выборках; предсказание - среднее по деревьям
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_estimators: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    seed: u64,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize, max_depth: Option<usize>, min_samples_split: usize, seed: u64) -> Self {
        Self {
            n_estimators: n_estimators.max(1),
            max_depth,
            min_samples_split: min_samples_split.max(2),
            seed,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    pub fn is_trained(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Деревья обучаются параллельно; у каждого свой генератор `seed + index`,
    /// поэтому результат не зависит от числа потоков
    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        let n_samples = X.nrows();
        if n_samples == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if n_samples != y.len() {
            return Err(ModelError::LengthMismatch {
                features: n_samples,
                targets: y.len(),
            });
        }

        let params = TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        };
        let seed = self.seed;

        let trees: Vec<RegressionTree> = (0..self.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let bootstrap: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                RegressionTree::fit(X, y, bootstrap, params)
            })
            .collect();

        self.trees = trees;
        self.n_features = X.ncols();
        tracing::debug!("Random forest fitted: {} trees, {} features", self.trees.len(), self.n_features);
        Ok(())
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if !self.is_trained() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if X.ncols() != self.n_features {
            return Err(ModelError::FeatureMismatch {
                expected: self.n_features,
                actual: X.ncols(),
            });
        }

        let n_trees = self.trees.len() as f64;
        let predictions = X
            .rows()
            .into_iter()
            .map(|row| self.trees.iter().map(|t| t.predict_row(row)).sum::<f64>() / n_trees)
            .collect();

        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn single_tree_fits_step_function_exactly() {
        let X = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = array![5.0, 5.0, 5.0, 20.0, 20.0, 20.0];
        let params = TreeParams {
            max_depth: None,
            min_samples_split: 2,
        };
        let tree = RegressionTree::fit(&X, &y, (0..6).collect(), params);

        match &tree.root {
            TreeNode::Split { feature, threshold, .. } => {
                assert_eq!(*feature, 0);
                assert_eq!(*threshold, 6.5);
            }
            TreeNode::Leaf { .. } => panic!("expected a split"),
        }
        assert_eq!(tree.predict_row(array![2.5].view()), 5.0);
        assert_eq!(tree.predict_row(array![100.0].view()), 20.0);
    }

    #[test]
    fn adjacent_large_values_split_without_looping() {
        let base = 2f64.powi(53);
        let X = array![[base + 2.0], [base + 2.0], [base + 4.0], [base + 4.0]];
        let y = array![1.0, 1.0, 5.0, 5.0];
        let params = TreeParams {
            max_depth: None,
            min_samples_split: 2,
        };
        let tree = RegressionTree::fit(&X, &y, (0..4).collect(), params);

        match &tree.root {
            TreeNode::Split { threshold, .. } => assert_eq!(*threshold, base + 2.0),
            TreeNode::Leaf { .. } => panic!("expected a split"),
        }
        assert_eq!(tree.predict_row(array![base + 2.0].view()), 1.0);
        assert_eq!(tree.predict_row(array![base + 4.0].view()), 5.0);
    }

    #[test]
    fn max_depth_limits_growth() {
        let X = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];
        let params = TreeParams {
            max_depth: Some(0),
            min_samples_split: 2,
        };
        let tree = RegressionTree::fit(&X, &y, (0..4).collect(), params);
        assert!(matches!(tree.root, TreeNode::Leaf { value } if value == 2.5));
    }

    #[test]
    fn forest_is_deterministic_for_fixed_seed() {
        let X = array![[1.0, 0.0], [2.0, 1.0], [3.0, 0.0], [4.0, 1.0], [5.0, 0.0], [6.0, 1.0]];
        let y = array![10.0, 12.0, 15.0, 18.0, 30.0, 31.0];

        let mut a = RandomForestRegressor::new(25, None, 2, 42);
        let mut b = RandomForestRegressor::new(25, None, 2, 42);
        a.fit(&X, &y).unwrap();
        b.fit(&X, &y).unwrap();

        assert_eq!(a.n_trees(), 25);
        assert_eq!(a.predict(&X).unwrap(), b.predict(&X).unwrap());
    }

    #[test]
    fn predictions_stay_within_target_range() {
        let X = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![100.0, 200.0, 300.0, 400.0];
        let mut forest = RandomForestRegressor::new(10, None, 2, 7);
        forest.fit(&X, &y).unwrap();

        let pred = forest.predict(&array![[-50.0], [2.5], [99.0]]).unwrap();
        assert!(pred.iter().all(|p| (100.0..=400.0).contains(p)));
    }

    #[test]
    fn rejects_bad_shapes() {
        let mut forest = RandomForestRegressor::new(3, None, 2, 1);
        assert!(matches!(
            forest.fit(&Array2::zeros((0, 2)), &Array1::zeros(0)),
            Err(ModelError::EmptyTrainingSet)
        ));
        assert!(matches!(
            forest.fit(&Array2::zeros((3, 2)), &Array1::zeros(2)),
            Err(ModelError::LengthMismatch { .. })
        ));

        forest.fit(&Array2::zeros((3, 2)), &Array1::zeros(3)).unwrap();
        assert!(matches!(
            forest.predict(&Array2::zeros((1, 5))),
            Err(ModelError::FeatureMismatch { expected: 2, actual: 5 })
        ));
    }
}
