use std::sync::Arc;

use crate::http::error::Error;
use crate::http::google_api_client::GoogleApiClient;
use crate::http::operations;
use crate::http::operations::Operation;

#[derive(Clone)]
pub struct ComputeOperationClient {
    inner: Arc<GoogleApiClient>,
}

impl ComputeOperationClient {
    pub fn new(inner: Arc<GoogleApiClient>) -> Self {
        Self { inner }
    }

    /// Issues a single server side wait on the operation. The returned operation may still be running.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn wait(&self, project_id: &str, zone: Option<&str>, operation: &str) -> Result<Operation, Error> {
        let builder = operations::wait::build(self.inner.endpoint(), self.inner.http(), project_id, zone, operation);
        self.inner.send(builder).await
    }

    /// Blocks until the operation is `DONE`.
    ///
    /// Zonal operations are waited on through the zone the operation reports, all others through
    /// the global operations collection. A finished operation carrying errors is returned as
    /// [`Error::Operation`].
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn wait_until_done(&self, project_id: &str, operation: Operation) -> Result<Operation, Error> {
        let mut operation = operation;
        while !operation.is_done() {
            if operation.name.is_empty() {
                return Err(Error::InvalidOperation(format!("{operation:?}")));
            }
            tracing::trace!(
                "waiting for operation {} status={:?} progress={:?}",
                operation.name,
                operation.status,
                operation.progress
            );
            let zone = operation.zone_name().map(|z| z.to_string());
            operation = self.wait(project_id, zone.as_deref(), &operation.name).await?;
        }
        operation
            .to_result()
            .map_err(|e| Error::Operation(operation.name.clone(), e))?;
        Ok(operation)
    }
}
