use jiff::SignedDuration;
use mixplan_core::model::{MetricKind, MetricUnit, ParameterField};

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

const KBIT: f64 = 1e3;
const MBIT: f64 = 1e6;
const GBIT: f64 = 1e9;

/// Format a duration in seconds with millisecond precision
pub fn format_seconds(value: f64) -> String {
    format!("{:.3} s", value)
}

/// Format a raw byte count
pub fn format_bytes(value: f64) -> String {
    format!("{:.3} B", value)
}

/// Format a byte count in kilobytes (2^10)
pub fn format_kilobytes(value: f64) -> String {
    format!("{:.3} kB", value / KIB)
}

/// Format a byte count in megabytes (2^20)
pub fn format_megabytes(value: f64) -> String {
    format!("{:.3} MB", value / MIB)
}

/// Format a byte count in gigabytes (2^30)
pub fn format_gigabytes(value: f64) -> String {
    format!("{:.3} GB", value / GIB)
}

/// Format a byte count in terabytes (2^40)
pub fn format_terabytes(value: f64) -> String {
    format!("{:.3} TB", value / TIB)
}

/// Format a bit rate in kilobits (10^3)
pub fn format_kbits(value: f64) -> String {
    format!("{:.3} Kbit", value / KBIT)
}

/// Format a bit rate in megabits (10^6)
pub fn format_mbits(value: f64) -> String {
    format!("{:.3} Mbit", value / MBIT)
}

/// Format a bit rate in gigabits (10^9)
pub fn format_gbits(value: f64) -> String {
    format!("{:.3} Gbit", value / GBIT)
}

/// Format a byte count with the largest binary unit that keeps it above 1
/// (e.g., 50.000 kB, 1.079 GB)
pub fn format_size(value: f64) -> String {
    let abs_value = value.abs();

    if abs_value >= TIB {
        format_terabytes(value)
    } else if abs_value >= GIB {
        format_gigabytes(value)
    } else if abs_value >= MIB {
        format_megabytes(value)
    } else if abs_value >= KIB {
        format_kilobytes(value)
    } else {
        format_bytes(value)
    }
}

/// Format a bit rate with the largest decimal unit that keeps it above 1;
/// anything under a megabit prints in Kbit
pub fn format_rate(value: f64) -> String {
    let abs_value = value.abs();

    if abs_value >= GBIT {
        format_gbits(value)
    } else if abs_value >= MBIT {
        format_mbits(value)
    } else {
        format_kbits(value)
    }
}

/// Format a count with thousands separators, rounded to a whole number
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return if value > 0.0 { "unbounded".to_string() } else { "n/a".to_string() };
    }

    let abs_value = value.abs();
    let whole = abs_value.round() as u64;

    // Add thousands separators
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();

    if value < 0.0 && whole > 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Format a [0, 1] ratio as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Friendly duration, e.g. "3h" or "1m 30s"
pub fn format_duration(seconds: f64) -> String {
    match SignedDuration::try_from_secs_f64(seconds) {
        Ok(d) => format!("{:#}", d),
        Err(_) => format_seconds(seconds),
    }
}

/// Render a parameter value in the unit natural to its field
pub fn format_field(field: ParameterField, value: f64) -> String {
    match field {
        ParameterField::NumAuthorities | ParameterField::NumClients => format_count(value),
        ParameterField::ConsensusInterval => {
            format!("{} ({})", format_seconds(value), format_duration(value))
        }
        ParameterField::MessageInterval => format_seconds(value),
        ParameterField::MixBandwidth => format_mbits(value),
        ParameterField::MessageSize => format_kilobytes(value),
        ParameterField::DescriptorSize | ParameterField::SignatureSize => format_bytes(value),
        ParameterField::NoiseSignal => format!("{}", value),
    }
}

/// Render a metric value, scaled by its unit
pub fn format_metric(kind: MetricKind, value: f64) -> String {
    match kind.unit() {
        MetricUnit::BitsPerSecond => format_rate(value),
        MetricUnit::Bytes => format_size(value),
        MetricUnit::Ratio => format_percentage(value),
        MetricUnit::Count => match kind {
            // Fractional mixes are meaningful; keep some precision
            MetricKind::NumMixesRequired => format!("{:.3}", value),
            _ => format_count(value),
        },
    }
}
