use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

const PORTFOLIO_SOURCE: &str = include_str!("../data/projects.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u32);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Completed,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Planning,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Completed, Self::InProgress, Self::Planning];

    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Planning => "Planning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
}

impl Project {
    /// Link target for the card call-to-action.
    pub fn href(&self) -> String {
        self.detail_url
            .clone()
            .unwrap_or_else(|| format!("/projects/{}", self.id))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// Display data derived from a project status. Shared by the grid card and
/// the detail view so the two never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    pub badge_class: &'static str,
    pub button_label: &'static str,
    pub button_disabled: bool,
}

pub fn status_presentation(status: ProjectStatus) -> StatusPresentation {
    match status {
        ProjectStatus::Completed => StatusPresentation {
            badge_class: "bg-green-100 text-green-800 dark:bg-green-900/20 dark:text-green-400",
            button_label: "View Project",
            button_disabled: false,
        },
        ProjectStatus::InProgress => StatusPresentation {
            badge_class: "bg-blue-100 text-blue-800 dark:bg-blue-900/20 dark:text-blue-400",
            button_label: "View Progress",
            button_disabled: false,
        },
        ProjectStatus::Planning => StatusPresentation {
            badge_class: "bg-yellow-100 text-yellow-800 dark:bg-yellow-900/20 dark:text-yellow-400",
            button_label: "Coming Soon",
            button_disabled: true,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard<'a> {
    pub project: &'a Project,
    pub presentation: StatusPresentation,
    /// `None` while the call-to-action is disabled.
    pub link: Option<String>,
}

pub fn card(project: &Project) -> ProjectCard<'_> {
    let presentation = status_presentation(project.status);
    let link = (!presentation.button_disabled).then(|| project.href());
    ProjectCard {
        project,
        presentation,
        link,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse catalog source: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("project id must be positive")]
    ZeroId,
    #[error("duplicate project id {0}")]
    DuplicateId(ProjectId),
    #[error("project {0} has an empty title")]
    EmptyTitle(ProjectId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if project.id.0 == 0 {
                return Err(CatalogError::ZeroId);
            }
            if !seen.insert(project.id) {
                return Err(CatalogError::DuplicateId(project.id));
            }
            if project.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(project.id));
            }
        }
        Ok(Self { projects })
    }

    /// Parses a YAML sequence of projects. Unknown statuses fail here, before
    /// any record can reach `status_presentation`.
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> = serde_yaml::from_str(source)?;
        Self::new(projects)
    }

    /// The catalog embedded in the crate.
    pub fn portfolio() -> Result<Self, CatalogError> {
        Self::from_yaml_str(PORTFOLIO_SOURCE)
    }

    pub fn list_all(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.has_tag(tag))
            .collect()
    }

    /// Applies the optional `filter` query value; absent or empty lists all.
    pub fn filter(&self, tag: Option<&str>) -> Vec<&Project> {
        match tag {
            Some(tag) if !tag.is_empty() => self.filter_by_tag(tag),
            _ => self.projects.iter().collect(),
        }
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Distinct tags in first-appearance order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .flat_map(|project| project.tags.iter())
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn project(id: u32, tags: &[&str], status: ProjectStatus) -> Project {
    Project {
        id: ProjectId(id),
        title: format!("Project {id}"),
        description: String::new(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        status,
        detail_url: None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(projects: &[&Project]) -> Vec<u32> {
        projects.iter().map(|project| project.id.0).collect()
    }

    fn six() -> Catalog {
        Catalog::new(vec![
            project(1, &["Data Visualization", "Psychology"], ProjectStatus::Completed),
            project(2, &["AI/ML", "Education"], ProjectStatus::InProgress),
            project(3, &["Behavioral Science", "Psychology"], ProjectStatus::Planning),
            project(4, &["Algorithms", "Education"], ProjectStatus::InProgress),
            project(5, &["Mobile", "Psychology"], ProjectStatus::Completed),
            project(6, &["Gamification", "Education"], ProjectStatus::Planning),
        ])
        .expect("catalog")
    }

    #[test]
    fn status_presentation_covers_every_status() {
        let labels: Vec<(&str, bool)> = ProjectStatus::ALL
            .iter()
            .map(|status| {
                let presentation = status_presentation(*status);
                (presentation.button_label, presentation.button_disabled)
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ("View Project", false),
                ("View Progress", false),
                ("Coming Soon", true),
            ]
        );
        for status in ProjectStatus::ALL {
            assert_eq!(status_presentation(status), status_presentation(status));
        }
    }

    #[test]
    fn psychology_filter_keeps_order_and_status() {
        let catalog = six();
        let filtered = catalog.filter_by_tag("Psychology");
        assert_eq!(ids(&filtered), vec![1, 3, 5]);

        let planning = card(filtered[1]);
        assert!(planning.presentation.button_disabled);
        assert_eq!(planning.presentation.button_label, "Coming Soon");
        assert_eq!(planning.link, None);
        assert_eq!(card(filtered[0]).link.as_deref(), Some("/projects/1"));
    }

    #[test]
    fn filter_by_tag_is_idempotent() {
        let catalog = six();
        let once = catalog.filter_by_tag("Education");
        let owned: Vec<Project> = once.iter().map(|project| (*project).clone()).collect();
        let again = Catalog::new(owned).expect("subset");
        assert_eq!(ids(&again.filter_by_tag("Education")), ids(&once));
    }

    #[test]
    fn union_of_filters_follows_catalog_order() {
        let catalog = six();
        let mut union: Vec<u32> = catalog
            .filter_by_tag("Education")
            .into_iter()
            .chain(catalog.filter_by_tag("Psychology"))
            .map(|project| project.id.0)
            .collect();
        let order: Vec<u32> = catalog.list_all().iter().map(|p| p.id.0).collect();
        union.sort_by_key(|id| order.iter().position(|candidate| candidate == id));
        union.dedup();
        assert_eq!(union, vec![1, 2, 3, 4, 5, 6]);
        for tag in ["Education", "Psychology"] {
            let filtered = ids(&catalog.filter_by_tag(tag));
            let mut sorted = filtered.clone();
            sorted.sort_by_key(|id| order.iter().position(|candidate| candidate == id));
            assert_eq!(filtered, sorted);
        }
    }

    #[test]
    fn tag_match_is_case_sensitive_and_exact() {
        let catalog = six();
        assert!(catalog.filter_by_tag("psychology").is_empty());
        assert!(catalog.filter_by_tag("Psych").is_empty());
        assert!(catalog.filter_by_tag("Unknown").is_empty());
    }

    #[test]
    fn empty_filter_lists_everything() {
        let catalog = six();
        assert_eq!(catalog.filter(None).len(), 6);
        assert_eq!(catalog.filter(Some("")).len(), 6);
        assert_eq!(ids(&catalog.filter(Some("Mobile"))), vec![5]);
    }

    #[test]
    fn construction_rejects_invalid_records() {
        let duplicate = Catalog::new(vec![
            project(1, &[], ProjectStatus::Completed),
            project(1, &[], ProjectStatus::Planning),
        ]);
        assert!(matches!(duplicate, Err(CatalogError::DuplicateId(ProjectId(1)))));

        let zero = Catalog::new(vec![project(0, &[], ProjectStatus::Completed)]);
        assert!(matches!(zero, Err(CatalogError::ZeroId)));

        let mut untitled = project(2, &[], ProjectStatus::Completed);
        untitled.title = "  ".to_string();
        assert!(matches!(
            Catalog::new(vec![untitled]),
            Err(CatalogError::EmptyTitle(ProjectId(2)))
        ));
    }

    #[test]
    fn unknown_status_is_rejected_at_parse_time() {
        let source = "- id: 1\n  title: Odd\n  status: Archived\n";
        assert!(matches!(
            Catalog::from_yaml_str(source),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn detail_url_overrides_default_link() {
        let mut linked = project(7, &[], ProjectStatus::InProgress);
        linked.detail_url = Some("https://example.com/demo".to_string());
        assert_eq!(card(&linked).link.as_deref(), Some("https://example.com/demo"));
    }

    #[test]
    fn embedded_portfolio_parses() {
        let catalog = Catalog::portfolio().expect("portfolio");
        assert_eq!(catalog.len(), 6);
        assert_eq!(ids(&catalog.filter_by_tag("Psychology")), vec![1, 5]);
        assert_eq!(ids(&catalog.filter_by_tag("Education")), vec![2, 4, 6]);
        assert_eq!(
            catalog.get(ProjectId(2)).map(|project| project.status),
            Some(ProjectStatus::InProgress)
        );
        assert_eq!(&catalog.tags()[..3], &["Data Visualization", "Psychology", "React"]);
    }
}
