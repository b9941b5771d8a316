//! Output Formatting
//!
//! Console report, one block per input size:
//!
//! ```text
//! N = 100000
//! Warmup Result: 0.4597..., Abs Error: 0.00012...
//! Median (ms): 1.234
//! Min (ms):    1.200
//! P90 (ms):    1.300
//! P95 (ms):    1.350
//!
//! Bootstrap CI (95%) (ms): [1.220, 1.250]
//!
//! ```

use super::statistics::SizeReport;
use sinebench_core::KernelKind;

/// Header printed before the first size of a kernel
pub fn format_kernel_header(kind: KernelKind) -> String {
    format!("== {} ==\n", kind)
}

/// Format the report for one input size
pub fn format_size_report(report: &SizeReport) -> String {
    let mut output = String::new();
    let s = &report.summary;
    let ci = &report.bootstrap.confidence_interval;

    output.push_str(&format!("N = {}\n", report.size));
    output.push_str(&format!(
        "Warmup Result: {}, Abs Error: {}\n",
        report.warmup_result, report.abs_error
    ));
    output.push_str(&format!("Median (ms): {:.3}\n", s.median));
    output.push_str(&format!("Min (ms):    {:.3}\n", s.min));
    output.push_str(&format!("P90 (ms):    {:.3}\n", s.p90));
    output.push_str(&format!("P95 (ms):    {:.3}\n", s.p95));
    output.push('\n');
    output.push_str(&format!(
        "Bootstrap CI ({}%) (ms): [{:.3}, {:.3}]\n",
        format_level(ci.level),
        ci.lower,
        ci.upper
    ));
    output.push('\n');

    output
}

/// 0.95 -> "95", 0.995 -> "99.5"
fn format_level(level: f64) -> String {
    let percent = format!("{:.2}", level * 100.0);
    percent
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinebench_stats::{BootstrapResult, ConfidenceInterval, SummaryStatistics};

    fn report() -> SizeReport {
        SizeReport {
            kernel: "iterative",
            size: 100_000,
            warmup_result: 0.5,
            abs_error: 0.25,
            summary: SummaryStatistics {
                median: 1.23456,
                min: 1.0,
                max: 3.0,
                p90: 2.0004,
                p95: 2.5,
                sample_count: 200,
            },
            bootstrap: BootstrapResult {
                point_estimate: 1.23456,
                confidence_interval: ConfidenceInterval {
                    lower: 1.2,
                    upper: 1.3,
                    level: 0.95,
                },
                standard_error: 0.01,
                iterations: 1000,
                warning: None,
            },
        }
    }

    #[test]
    fn test_size_report_layout() {
        let text = format_size_report(&report());
        let expected = "N = 100000\n\
                        Warmup Result: 0.5, Abs Error: 0.25\n\
                        Median (ms): 1.235\n\
                        Min (ms):    1.000\n\
                        P90 (ms):    2.000\n\
                        P95 (ms):    2.500\n\
                        \n\
                        Bootstrap CI (95%) (ms): [1.200, 1.300]\n\
                        \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_kernel_header() {
        assert_eq!(format_kernel_header(KernelKind::Vectorized), "== vectorized ==\n");
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(0.95), "95");
        assert_eq!(format_level(0.9), "90");
        assert_eq!(format_level(0.995), "99.5");
    }
}
