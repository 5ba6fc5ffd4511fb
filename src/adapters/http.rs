use crate::domain::model::{
    Blacklist, CourseCatalogEntry, Curriculum, CurriculumConstraint, ElectiveRule,
};
use crate::domain::ports::{CourseCatalogProvider, CurriculumProvider};
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Curriculum and catalog provider backed by the campus HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCurriculumProvider {
    client: Client,
    base_url: String,
}

impl HttpCurriculumProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AdvisorError::FetchError {
                resource: resource.to_string(),
                message: format!("{} returned HTTP {}", url, response.status()),
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Fetches a list payload and runs boundary validation over every item
    /// before it reaches the core.
    async fn get_validated_list<T: DeserializeOwned + Validate>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<Vec<T>> {
        let items: Vec<T> = self.get_json(path, resource).await?;
        for item in &items {
            item.validate()?;
        }
        Ok(items)
    }
}

#[async_trait]
impl CurriculumProvider for HttpCurriculumProvider {
    async fn fetch_curriculum(&self, curriculum_id: &str) -> Result<Curriculum> {
        let curriculum: Curriculum = self
            .get_json(&format!("curricula/{}", curriculum_id), "curriculum")
            .await?;
        curriculum.validate()?;
        Ok(curriculum)
    }

    async fn fetch_constraints(&self, curriculum_id: &str) -> Result<Vec<CurriculumConstraint>> {
        self.get_validated_list(
            &format!("curricula/{}/constraints", curriculum_id),
            "constraints",
        )
        .await
    }

    async fn fetch_elective_rules(&self, curriculum_id: &str) -> Result<Vec<ElectiveRule>> {
        self.get_validated_list(
            &format!("curricula/{}/elective-rules", curriculum_id),
            "elective rules",
        )
        .await
    }

    async fn fetch_blacklists(&self, curriculum_id: &str) -> Result<Vec<Blacklist>> {
        self.get_validated_list(
            &format!("curricula/{}/blacklists", curriculum_id),
            "blacklists",
        )
        .await
    }
}

#[async_trait]
impl CourseCatalogProvider for HttpCurriculumProvider {
    async fn fetch_courses(
        &self,
        department_id: &str,
        curriculum_id: Option<&str>,
    ) -> Result<Vec<CourseCatalogEntry>> {
        let path = match curriculum_id {
            Some(id) => format!("departments/{}/courses?curriculum={}", department_id, id),
            None => format!("departments/{}/courses", department_id),
        };
        self.get_validated_list(&path, "course catalog").await
    }
}
