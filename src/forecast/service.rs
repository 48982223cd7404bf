use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::bmkg::{BmkgClient, BmkgError};
use super::cache::{ForecastStore, Namespace};
use super::normalize::{normalize, to_sequence, ForecastMap};
use super::provinces::PROVINCES;
use super::types::{Area, ForecastRecord, Province};
use crate::utils::area_key;

/// Area names per province code, captured once at startup.
#[derive(Debug, Clone, Default)]
pub struct AreaIndex {
    areas: HashMap<String, Vec<String>>,
}

impl AreaIndex {
    /// Fetch every province concurrently. Any failure aborts the whole build.
    pub async fn build<I, S>(client: Arc<BmkgClient>, province_codes: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tasks = JoinSet::new();
        for code in province_codes {
            let code = code.into();
            let client = client.clone();
            tasks.spawn(async move {
                let doc = client.fetch(&code).await;
                (code, doc)
            });
        }

        let mut index = Self::default();
        while let Some(joined) = tasks.join_next().await {
            let (code, doc) = joined?;
            let doc = doc.map_err(|e| anyhow::anyhow!("area index for {}: {}", code, e))?;
            let names = doc
                .forecast
                .areas
                .into_iter()
                .map(|a| a.description)
                .collect::<Vec<_>>();
            tracing::debug!(province = %code, areas = names.len(), "Indexed province areas");
            index.insert(code, names);
        }

        tracing::info!(provinces = index.areas.len(), "Area index ready");
        Ok(index)
    }

    pub fn insert(&mut self, province_code: impl Into<String>, names: Vec<String>) {
        self.areas.insert(province_code.into(), names);
    }

    pub fn names(&self, province_code: &str) -> &[String] {
        self.areas
            .get(province_code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Cache-aside lookups over the upstream feed.
pub struct ForecastService {
    client: Arc<BmkgClient>,
    store: ForecastStore,
    area_index: AreaIndex,
}

impl ForecastService {
    pub fn new(client: Arc<BmkgClient>, store: ForecastStore, area_index: AreaIndex) -> Self {
        Self {
            client,
            store,
            area_index,
        }
    }

    pub fn provinces(&self) -> Vec<Province> {
        PROVINCES
            .iter()
            .map(|(name, code)| Province {
                id: code.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    pub fn areas(&self, province_code: &str) -> Vec<Area> {
        self.area_index
            .names(province_code)
            .iter()
            .map(|name| Area {
                id: area_key(name),
                name: name.clone(),
            })
            .collect()
    }

    pub async fn forecast_by_province(
        &self,
        province_code: &str,
    ) -> Result<Vec<ForecastRecord>, BmkgError> {
        if let Some(cached) = self.store.get(Namespace::Sequence, province_code).await {
            tracing::debug!(province = province_code, "Province forecast cache hit");
            return Ok(cached);
        }

        tracing::debug!(province = province_code, "Province forecast cache miss");
        let records = to_sequence(self.fetch_normalized(province_code).await?);
        if let Err(e) = self.store.put(Namespace::Sequence, province_code, &records).await {
            tracing::warn!(province = province_code, "Failed to cache province forecast: {}", e);
        }

        Ok(records)
    }

    /// Unknown area ids resolve to an empty record.
    pub async fn forecast_by_area(
        &self,
        province_code: &str,
        area_id: &str,
    ) -> Result<ForecastRecord, BmkgError> {
        let areas: ForecastMap = match self.store.get(Namespace::Map, province_code).await {
            Some(cached) => {
                tracing::debug!(province = province_code, "Area forecast cache hit");
                cached
            }
            None => {
                tracing::debug!(province = province_code, "Area forecast cache miss");
                let areas = self.fetch_normalized(province_code).await?;
                if let Err(e) = self.store.put(Namespace::Map, province_code, &areas).await {
                    tracing::warn!(province = province_code, "Failed to cache area forecast: {}", e);
                }
                areas
            }
        };

        Ok(areas.get(area_id).cloned().unwrap_or_default())
    }

    async fn fetch_normalized(&self, province_code: &str) -> Result<ForecastMap, BmkgError> {
        tracing::info!(province = province_code, "Fetching forecast from upstream");
        let doc = self.client.fetch(province_code).await?;
        normalize(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::forecast::bmkg::fixtures::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_jakarta(mock_server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/DigitalForecast-DKIJakarta.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(jakarta_xml()))
            .expect(expected_calls)
            .mount(mock_server)
            .await;
    }

    fn service_for(mock_server: &MockServer, store: ForecastStore) -> ForecastService {
        let client = BmkgClient::new(&Config::for_tests(&mock_server.uri())).unwrap();
        ForecastService::new(Arc::new(client), store, AreaIndex::default())
    }

    #[tokio::test]
    async fn test_forecast_by_area_end_to_end() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 1).await;
        let service = service_for(&mock_server, ForecastStore::new(None));

        let record = service
            .forecast_by_area("DKIJakarta", "jakarta-pusat")
            .await
            .unwrap();

        assert_eq!(record.territory.name, "Jakarta Pusat");
        assert_eq!(area_key(&record.territory.name), "jakarta-pusat");
        assert_eq!(record.temperature[0].time, "12:30");
    }

    #[tokio::test]
    async fn test_forecast_by_area_served_from_cache() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 1).await;
        let service = service_for(&mock_server, ForecastStore::new(None));

        let first = service.forecast_by_area("DKIJakarta", "jakarta-utara").await.unwrap();
        let second = service.forecast_by_area("DKIJakarta", "jakarta-utara").await.unwrap();
        let other = service.forecast_by_area("DKIJakarta", "jakarta-pusat").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(other.territory.name, "Jakarta Pusat");
    }

    #[tokio::test]
    async fn test_unknown_area_is_empty_record() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 1).await;
        let service = service_for(&mock_server, ForecastStore::new(None));

        let record = service.forecast_by_area("DKIJakarta", "atlantis").await.unwrap();

        assert_eq!(record, ForecastRecord::default());
    }

    #[tokio::test]
    async fn test_forecast_by_province_served_from_cache() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 1).await;
        let service = service_for(&mock_server, ForecastStore::new(None));

        let first = service.forecast_by_province("DKIJakarta").await.unwrap();
        let second = service.forecast_by_province("DKIJakarta").await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_namespaces_fetch_separately() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 2).await;
        let service = service_for(&mock_server, ForecastStore::new(None));

        service.forecast_by_province("DKIJakarta").await.unwrap();
        service.forecast_by_area("DKIJakarta", "jakarta-pusat").await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 2).await;
        let service = service_for(
            &mock_server,
            ForecastStore::new(Some(Duration::from_millis(100))),
        );

        service.forecast_by_province("DKIJakarta").await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        service.forecast_by_province("DKIJakarta").await.unwrap();
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_and_is_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&mock_server)
            .await;
        let store = ForecastStore::new(None);
        let service = service_for(&mock_server, store.clone());

        assert!(matches!(
            service.forecast_by_province("DKIJakarta").await,
            Err(BmkgError::Status(_))
        ));
        assert!(service.forecast_by_area("DKIJakarta", "jakarta-pusat").await.is_err());
        assert_eq!(store.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_misses_leave_valid_entry() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/DigitalForecast-DKIJakarta.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(jakarta_xml()))
            .expect(1..=2u64)
            .mount(&mock_server)
            .await;
        let store = ForecastStore::new(None);
        let service = Arc::new(service_for(&mock_server, store.clone()));

        let a = tokio::spawn({
            let service = service.clone();
            async move { service.forecast_by_area("DKIJakarta", "jakarta-pusat").await }
        });
        let b = tokio::spawn({
            let service = service.clone();
            async move { service.forecast_by_area("DKIJakarta", "jakarta-pusat").await }
        });
        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(a, b);

        let stored: ForecastMap = store.get(Namespace::Map, "DKIJakarta").await.unwrap();
        assert_eq!(stored["jakarta-pusat"], a);
    }

    #[tokio::test]
    async fn test_area_index_build() {
        let mock_server = MockServer::start().await;
        mount_jakarta(&mock_server, 1).await;
        Mock::given(method("GET"))
            .and(path("/DigitalForecast-Bali.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(document_xml(&[
                area_xml("1", "Denpasar", HUMIDITY),
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = Arc::new(BmkgClient::new(&Config::for_tests(&mock_server.uri())).unwrap());

        let index = AreaIndex::build(client.clone(), ["DKIJakarta", "Bali"]).await.unwrap();
        let service = ForecastService::new(client, ForecastStore::new(None), index);

        assert_eq!(
            service.areas("DKIJakarta"),
            vec![
                Area { id: "jakarta-pusat".to_string(), name: "Jakarta Pusat".to_string() },
                Area { id: "jakarta-utara".to_string(), name: "Jakarta Utara".to_string() },
            ]
        );
        assert_eq!(service.areas("Bali").len(), 1);
        assert!(service.areas("Papua").is_empty());
    }

    #[tokio::test]
    async fn test_area_index_build_fails_on_upstream_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/DigitalForecast-DKIJakarta.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(jakarta_xml()))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/DigitalForecast-Bali.xml"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        let client = Arc::new(BmkgClient::new(&Config::for_tests(&mock_server.uri())).unwrap());

        assert!(AreaIndex::build(client, ["DKIJakarta", "Bali"]).await.is_err());
    }

    #[test]
    fn test_provinces_cover_table() {
        let service = ForecastService::new(
            Arc::new(BmkgClient::new(&Config::for_tests("http://127.0.0.1:1")).unwrap()),
            ForecastStore::new(None),
            AreaIndex::default(),
        );

        let provinces = service.provinces();
        assert_eq!(provinces.len(), PROVINCES.len());
        assert!(provinces
            .iter()
            .any(|p| p.id == "DKIJakarta" && p.name == "DKI Jakarta"));
    }
}
