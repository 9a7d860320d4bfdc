//! Parsing and batch validation of habit.frame.v1 streams

use crate::error::EngineError;
use crate::schema::frame_record::*;

/// Adapter for reading frame records from JSON and NDJSON input
pub struct FrameRecordAdapter;

impl FrameRecordAdapter {
    /// Parse a JSON string containing an array of FrameRecords
    pub fn parse_array(json: &str) -> Result<Vec<FrameRecord>, EngineError> {
        let records: Vec<FrameRecord> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (newline-delimited JSON) containing FrameRecords
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<FrameRecord>, EngineError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match Self::parse_line(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(EngineError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }

    /// Parse a single record line
    pub fn parse_line(line: &str) -> Result<FrameRecord, EngineError> {
        Ok(serde_json::from_str::<FrameRecord>(line)?)
    }

    /// Validate a batch of records, returning only the failures
    pub fn validate_records(records: &[FrameRecord]) -> Vec<ValidationResult> {
        records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                record.validate().err().map(|error| ValidationResult {
                    index: idx,
                    record_id: record.record_id.clone(),
                    error,
                })
            })
            .collect()
    }

    /// Check that timestamps never go backwards
    pub fn first_out_of_order(records: &[FrameRecord]) -> Option<usize> {
        records
            .windows(2)
            .position(|pair| pair[1].timestamp_ms < pair[0].timestamp_ms)
            .map(|idx| idx + 1)
    }
}

/// A record that failed validation
#[derive(Debug)]
pub struct ValidationResult {
    pub index: usize,
    pub record_id: Option<String>,
    pub error: ValidationError,
}

#[cfg(test)]
mod tests {
    use super::*;

    const NDJSON: &str = r#"{"schema_version":"habit.frame.v1","timestamp_ms":0,"record_type":"frame","payload":{"frame":{"hands":[],"face":[]}}}

{"schema_version":"habit.frame.v1","timestamp_ms":33,"record_type":"tick"}
{"schema_version":"habit.frame.v1","timestamp_ms":66,"record_type":"control","payload":{"control":{"action":"toggle_pause"}}}"#;

    #[test]
    fn test_parse_ndjson() {
        let records = FrameRecordAdapter::parse_ndjson(NDJSON).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].record_type, RecordType::Tick);
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let err = FrameRecordAdapter::parse_ndjson("{\"schema_version\":\"habit.frame.v1\",\"timestamp_ms\":0,\"record_type\":\"tick\"}\nnot json")
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_array() {
        let records = vec![FrameRecord::tick(1), FrameRecord::tick(2)];
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(FrameRecordAdapter::parse_array(&json).unwrap(), records);
    }

    #[test]
    fn test_validate_records() {
        let mut records = FrameRecordAdapter::parse_ndjson(NDJSON).unwrap();
        assert!(FrameRecordAdapter::validate_records(&records).is_empty());

        records[2].record_type = RecordType::Frame;
        let failures = FrameRecordAdapter::validate_records(&records);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 2);
    }

    #[test]
    fn test_out_of_order_detection() {
        let records = vec![FrameRecord::tick(10), FrameRecord::tick(20), FrameRecord::tick(15)];
        assert_eq!(FrameRecordAdapter::first_out_of_order(&records), Some(2));
        assert_eq!(FrameRecordAdapter::first_out_of_order(&records[..2]), None);
    }
}
