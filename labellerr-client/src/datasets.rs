//! Dataset API endpoints

use labellerr_core::Progress;
use labellerr_core::domain::dataset::Dataset;
use labellerr_core::dto::dataset::{CreateDatasetRequest, DatasetConfig};
use labellerr_core::registry::DatasetKind;
use tracing::info;

use crate::error::Result;
use crate::poll::{FetchFuture, JobHandle, PollConfig, Poller};
use crate::transport::ApiRequest;
use crate::{ClientError, LabellerrClient, PollResult};

impl LabellerrClient {
    // =============================================================================
    // Dataset Management
    // =============================================================================

    /// Create an empty dataset
    ///
    /// # Arguments
    /// * `config` - Name, data type, and description of the dataset
    /// * `created_by` - Email of the owner, if any
    ///
    /// # Returns
    /// The id of the new dataset
    pub async fn create_dataset(
        &self,
        config: &DatasetConfig,
        created_by: Option<&str>,
    ) -> Result<String> {
        config.validate()?;

        let body = CreateDatasetRequest::new(config, created_by.map(str::to_string));
        let request = ApiRequest::post("/datasets/create").json(&body)?;
        self.send(request).await?;

        info!("Created dataset {} ({})", body.dataset_id, config.dataset_name);
        Ok(body.dataset_id)
    }

    /// Get a dataset by ID
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset ID
    ///
    /// # Returns
    /// The dataset details, including its processing status
    pub async fn get_dataset(&self, dataset_id: &str) -> Result<Dataset> {
        let request = ApiRequest::get(format!("/datasets/{}", dataset_id));
        self.call_response(request).await
    }

    /// Get a dataset wrapped in the variant for its data type
    pub async fn get_dataset_kind(&self, dataset_id: &str) -> Result<DatasetKind> {
        let dataset = self.get_dataset(dataset_id).await?;
        Ok(dataset.kind()?)
    }

    // =============================================================================
    // Dataset Readiness
    // =============================================================================

    /// Poll a dataset until it is ready
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset ID
    /// * `config` - Interval and limits of the poll loop
    ///
    /// # Returns
    /// The dataset as last fetched, once its status reads ready
    pub async fn wait_for_dataset(
        &self,
        dataset_id: &str,
        config: PollConfig,
    ) -> PollResult<Dataset> {
        dataset_poller(self.clone(), dataset_id.to_string(), config)
            .run()
            .await
    }

    /// Poll a dataset on a background task
    ///
    /// The returned handle can be awaited later; dropping it does not stop
    /// the poll loop.
    pub fn wait_for_dataset_async(
        &self,
        dataset_id: &str,
        config: PollConfig,
    ) -> JobHandle<Dataset, ClientError> {
        dataset_poller(self.clone(), dataset_id.to_string(), config).spawn()
    }
}

fn dataset_poller(
    client: LabellerrClient,
    dataset_id: String,
    config: PollConfig,
) -> Poller<
    impl FnMut() -> FetchFuture<Dataset, ClientError> + Send + 'static,
    impl Fn(&Dataset) -> Progress + Send + 'static,
    Dataset,
    ClientError,
> {
    let fetch = move || -> FetchFuture<Dataset, ClientError> {
        let client = client.clone();
        let dataset_id = dataset_id.clone();
        Box::pin(async move { client.get_dataset(&dataset_id).await })
    };

    Poller::new(fetch, |dataset: &Dataset| dataset.status().progress()).with_config(config)
}
