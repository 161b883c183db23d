//! Descriptive statistics over numeric columns
//!
//! All functions skip NaN entries (missing cells), so a column with gaps still
//! yields sums and means over the values that are present.

fn present(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

/// Pairs where both sides are present
fn present_pairs(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter()
        .copied()
        .zip(ys.iter().copied())
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .collect()
}

pub fn count(values: &[f64]) -> usize {
    present(values).count()
}

pub fn sum(values: &[f64]) -> f64 {
    present(values).sum()
}

/// Arithmetic mean, None when no value is present
pub fn mean(values: &[f64]) -> Option<f64> {
    let n = count(values);
    if n == 0 {
        return None;
    }
    Some(sum(values) / n as f64)
}

/// Sample standard deviation (n - 1 denominator)
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let n = count(values);
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = present(values).map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(var.sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    present(values).reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    present(values).reduce(f64::max)
}

/// Index and value of the maximum. Ties resolve to the first occurrence.
pub fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((index, value)),
        }
    }
    best
}

/// Percent change from `first` to `last`; undefined when `first` is zero
pub fn percent_growth(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 || first.is_nan() || last.is_nan() {
        return None;
    }
    Some((last / first - 1.0) * 100.0)
}

/// `numerator / denominator` as a percentage; undefined for a zero denominator
pub fn ratio_percent(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || denominator.is_nan() || numerator.is_nan() {
        return None;
    }
    Some(numerator / denominator * 100.0)
}

/// Quantile with linear interpolation between closest ranks, `q` in [0, 1]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = present(values).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Pearson correlation over pairwise-present values. NaN when undefined.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs = present_pairs(xs, ys);
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Square correlation matrix, `matrix[i][j] = pearson(series[i], series[j])`
pub fn correlation_matrix(series: &[&[f64]]) -> Vec<Vec<f64>> {
    series
        .iter()
        .map(|a| series.iter().map(|b| pearson(a, b)).collect())
        .collect()
}

/// First-degree least-squares fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through the present pairs. None with fewer than two points or
/// when every x is the same.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let pairs = present_pairs(xs, ys);
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = pairs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = pairs.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the value range. A constant series is spread
/// over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let (lo, hi) = match (min(values), max(values)) {
        (Some(lo), Some(hi)) if bins > 0 => (lo, hi),
        _ => return Vec::new(),
    };
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;

    let mut result: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for value in present(values) {
        let index = (((value - lo) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }
    result
}

/// Summary row printed by the data preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Describe a column; undefined statistics come back as NaN
pub fn describe(values: &[f64]) -> Summary {
    Summary {
        count: count(values),
        mean: mean(values).unwrap_or(f64::NAN),
        std: std_dev(values).unwrap_or(f64::NAN),
        min: min(values).unwrap_or(f64::NAN),
        q25: quantile(values, 0.25).unwrap_or(f64::NAN),
        median: quantile(values, 0.5).unwrap_or(f64::NAN),
        q75: quantile(values, 0.75).unwrap_or(f64::NAN),
        max: max(values).unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sum_and_mean() {
        let sales = [100.0, 150.0, 200.0];
        assert_eq!(sum(&sales), 450.0);
        assert_eq!(mean(&sales), Some(150.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_missing_values_skipped() {
        let values = [1.0, f64::NAN, 3.0];
        assert_eq!(count(&values), 2);
        assert_eq!(sum(&values), 4.0);
        assert_eq!(mean(&values), Some(2.0));
    }

    #[test]
    fn test_argmax_ties_first_occurrence() {
        assert_eq!(argmax(&[5.0, 9.0, 3.0, 9.0]), Some((1, 9.0)));
        assert_eq!(argmax(&[f64::NAN, 2.0]), Some((1, 2.0)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_percent_growth() {
        assert_eq!(percent_growth(100.0, 150.0), Some(50.0));
        assert_eq!(percent_growth(200.0, 100.0), Some(-50.0));
        assert_eq!(percent_growth(0.0, 100.0), None);
        assert_eq!(ratio_percent(25.0, 100.0), Some(25.0));
        assert_eq!(ratio_percent(25.0, 0.0), None);
    }

    #[test]
    fn test_std_and_quantiles() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(std_dev(&values).unwrap(), 1.2909944487358056));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 1.0), Some(4.0));

        let summary = describe(&values);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert!(describe(&[7.0]).std.is_nan());
    }

    #[test]
    fn test_pearson() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(pearson(&x, &[2.0, 4.0, 6.0, 8.0]), 1.0));
        assert!(approx(pearson(&x, &[8.0, 6.0, 4.0, 2.0]), -1.0));
        assert!(pearson(&x, &[1.0, 1.0, 1.0, 1.0]).is_nan());

        let matrix = correlation_matrix(&[&x, &[2.0, 4.0, 6.0, 8.0]]);
        assert_eq!(matrix.len(), 2);
        assert!(approx(matrix[0][1], matrix[1][0]));
        assert!(approx(matrix[0][0], 1.0));
    }

    #[test]
    fn test_linear_fit() {
        let fit = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!(approx(fit.slope, 2.0));
        assert!(approx(fit.intercept, 1.0));
        assert!(approx(fit.at(10.0), 21.0));

        assert_eq!(linear_fit(&[1.0], &[2.0]), None);
        assert_eq!(linear_fit(&[3.0, 3.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn test_histogram_bins() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bins = histogram(&values, 8);
        assert_eq!(bins.len(), 8);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[7].upper, 8.0);
        // The maximum lands in the closed last bin
        assert_eq!(bins[7].count, 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }

    #[test]
    fn test_histogram_constant_series() {
        let bins = histogram(&[5.0, 5.0, 5.0], 8);
        assert_eq!(bins[0].lower, 4.5);
        assert_eq!(bins[7].upper, 5.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert!(histogram(&[], 8).is_empty());
    }
}
