use std::fmt;

pub mod wait;

/// Represents a Compute Engine long-running operation resource.
///
/// Operations are returned by every insert call and are polled until `status` is `DONE`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// The unique identifier for the operation, generated by the server.
    pub id: Option<String>,
    /// Name of the operation.
    #[serde(default)]
    pub name: String,
    /// The type of operation, such as `insert`, `update`, or `delete`.
    pub operation_type: Option<String>,
    /// The status of the operation.
    pub status: Option<OperationStatus>,
    /// An optional textual description of the current status of the operation.
    pub status_message: Option<String>,
    /// The URL of the resource that the operation modifies.
    pub target_link: Option<String>,
    /// Server-defined URL for the resource.
    pub self_link: Option<String>,
    /// The URL of the zone where the operation resides. Only applicable when performing
    /// per-zone operations.
    pub zone: Option<String>,
    /// The URL of the region where the operation resides. Only applicable when performing
    /// regional operations.
    pub region: Option<String>,
    /// An optional progress indicator that ranges from 0 to 100.
    pub progress: Option<i32>,
    /// If errors are generated during processing of the operation, this field will be populated.
    pub error: Option<OperationError>,
    /// If the operation fails, this field contains the HTTP error status code that was returned.
    pub http_error_status_code: Option<i32>,
    /// If the operation fails, this field contains the HTTP error message that was returned.
    pub http_error_message: Option<String>,
}

impl Operation {
    pub fn is_done(&self) -> bool {
        self.status == Some(OperationStatus::Done)
    }

    /// The zone name of a zonal operation, taken from the last segment of the zone URL.
    pub fn zone_name(&self) -> Option<&str> {
        self.zone
            .as_deref()
            .and_then(|zone| zone.rsplit('/').next())
            .filter(|zone| !zone.is_empty())
    }

    /// The errors of a finished operation, if any.
    pub fn to_result(&self) -> Result<(), OperationError> {
        match &self.error {
            Some(error) if !error.errors.is_empty() => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OperationError {
    /// The array of errors encountered while processing this operation.
    #[serde(default)]
    pub errors: Vec<OperationErrorItem>,
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| match (&e.code, &e.message) {
                (Some(code), Some(message)) => format!("{code}: {message}"),
                (None, Some(message)) => message.clone(),
                (Some(code), None) => code.clone(),
                (None, None) => "unknown error".to_string(),
            })
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for OperationError {}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OperationErrorItem {
    /// The error type identifier for this error, e.g. `QUOTA_EXCEEDED`.
    pub code: Option<String>,
    /// Indicates the field in the request that caused the error.
    pub location: Option<String>,
    /// An optional, human-readable error message.
    pub message: Option<String>,
}
