//! Discrepancy records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::Value;
use crate::sink::LogRecord;

/// A parameter on which two duplicate records disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub subject_id: Value,
    pub visit: Value,
    /// Date parts joined as `"{1} {2}, {3}"`.
    pub date: String,
    pub parameter: String,
    /// Value in the first record of the pair.
    pub record_1: Value,
    /// Value in the second record of the pair.
    pub record_2: Value,
    /// Zero-based data row indices of the pair, in file order.
    pub rows: [usize; 2],
}

impl Discrepancy {
    /// The log line body for this discrepancy.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// An informational log record under `logger`.
    pub fn to_record(&self, logger: &str) -> LogRecord {
        LogRecord::info(logger, self.message())
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subject '{}', Visit '{}', Date '{}': Discrepancy in '{}' (Record 1: {}, Record 2: {})",
            self.subject_id, self.visit, self.date, self.parameter, self.record_1, self.record_2
        )
    }
}

/// Join three date parts the way log lines show them.
pub fn composite_date(parts: [&Value; 3]) -> String {
    format!("{} {}, {}", parts[0], parts[1], parts[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let d = Discrepancy {
            subject_id: Value::Text("S01".to_string()),
            visit: Value::Integer(1),
            date: "Jan 5, 2020".to_string(),
            parameter: "DXA_BMD".to_string(),
            record_1: Value::Number(1.2),
            record_2: Value::Number(1.3),
            rows: [0, 1],
        };

        assert_eq!(
            d.to_record("root").to_string(),
            "INFO:root:Subject 'S01', Visit '1', Date 'Jan 5, 2020': \
             Discrepancy in 'DXA_BMD' (Record 1: 1.2, Record 2: 1.3)"
        );
    }

    #[test]
    fn test_composite_date() {
        let month = Value::Text("Mar".to_string());
        let day = Value::Integer(14);
        let year = Value::Integer(2021);
        assert_eq!(composite_date([&month, &day, &year]), "Mar 14, 2021");
    }
}
