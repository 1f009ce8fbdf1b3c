//! Reference catalogs.

use async_trait::async_trait;
use cmap_core::collaborators::{CurriculumFilter, CurriculumSource};
use cmap_core::entities::CurriculumCourse;
use cmap_core::errors::ProviderError;

use crate::error::MatchError;

/// A curriculum held in memory, e.g. loaded from a JSON file or extracted from a
/// curriculum document.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    courses: Vec<CurriculumCourse>,
}

impl InMemoryCatalog {
    #[must_use]
    pub const fn new(courses: Vec<CurriculumCourse>) -> Self {
        Self { courses }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl FromIterator<CurriculumCourse> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = CurriculumCourse>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl CurriculumSource for InMemoryCatalog {
    async fn courses(
        &self,
        filter: CurriculumFilter,
    ) -> Result<Vec<CurriculumCourse>, ProviderError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| filter.accepts(c))
            .cloned()
            .collect())
    }
}

/// Read reference courses from `source`.
///
/// # Errors
///
/// [`MatchError::Catalog`] when the source fails. An empty catalog is not an error.
pub async fn load_references(
    source: &dyn CurriculumSource,
    filter: CurriculumFilter,
) -> Result<Vec<CurriculumCourse>, MatchError> {
    let courses = source.courses(filter).await.map_err(MatchError::Catalog)?;
    tracing::debug!(count = courses.len(), ?filter, "loaded reference courses");
    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSource;

    #[async_trait]
    impl CurriculumSource for BrokenSource {
        async fn courses(
            &self,
            _filter: CurriculumFilter,
        ) -> Result<Vec<CurriculumCourse>, ProviderError> {
            Err(ProviderError::Unavailable("catalog offline".into()))
        }
    }

    #[tokio::test]
    async fn filters_required_and_semester() {
        let catalog: InMemoryCatalog = vec![
            CurriculumCourse::new("CS101", "Programming").with_semester(1),
            CurriculumCourse::new("CS401", "Compilers").with_semester(7),
            CurriculumCourse::new("HS101", "Ethics").elective(),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 3);

        let filter = CurriculumFilter {
            required_only: true,
            max_semester: Some(4),
        };
        let courses = load_references(&catalog, filter).await.unwrap();
        let codes: Vec<&str> = courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CS101"]);
    }

    #[tokio::test]
    async fn source_failure_is_structural() {
        let err = load_references(&BrokenSource, CurriculumFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Catalog(ProviderError::Unavailable(_))));
        assert!(err.to_string().contains("catalog offline"));
    }
}
