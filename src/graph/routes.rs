use super::assets::INDEX_HTML;
use super::data::GraphData;
use crate::analysis::{
    self, DependencyGraph, DependencyLink, DependencyTreeNode, Filter, GraphView, ProjectReport,
    SelectionClosure, link_dependencies, project_tree,
};
use crate::artifact::{ArtifactError, ArtifactSource, ProjectLoader};
use crate::config::{Config, UiPreferences};
use crate::model::{Component, Project, RiskLevel, group_projects};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers. Views are cached per project so
/// filter and selection requests operate on an already-built graph.
pub struct AppState {
    source: Box<dyn ArtifactSource>,
    views: Mutex<HashMap<String, GraphView>>,
    config: Mutex<Config>,
    config_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct GraphQuery {
    /// Case-insensitive substring filter on node labels.
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub vulnerable: bool,
    pub spacing: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ProjectGroup {
    name: String,
    runs: Vec<Project>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ComponentQuery {
    pub ecosystem: Option<String>,
    pub risk_level: Option<String>,
}

/// One row of the inventory table.
#[derive(Debug, Serialize)]
struct ComponentRow {
    unique_id: Option<u64>,
    name: String,
    version: String,
    ecosystem: Option<String>,
    licenses: Vec<String>,
    risk_level: Option<&'static str>,
    vulnerability_count: usize,
}

/// Full component record plus its dependency rows resolved to inventory ids.
#[derive(Debug, Serialize)]
struct ComponentDetail {
    component: Component,
    dependencies: Vec<DependencyLink>,
}

/// API error: artifact problems map onto HTTP statuses instead of tearing
/// down the server.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ArtifactError> for ApiError {
    fn from(e: ArtifactError) -> Self {
        let status = match &e {
            ArtifactError::Io { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                StatusCode::NOT_FOUND
            }
            ArtifactError::Status { status, .. } if *status == 404 => StatusCode::NOT_FOUND,
            ArtifactError::Http { .. } | ArtifactError::Status { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl AppState {
    pub fn new(source: Box<dyn ArtifactSource>, config: Config, config_dir: PathBuf) -> Self {
        Self {
            source,
            views: Mutex::new(HashMap::new()),
            config: Mutex::new(config),
            config_dir,
        }
    }

    /// Run `f` against the cached view for `project`, building it on first use.
    fn with_view<R>(
        &self,
        project: &str,
        f: impl FnOnce(&mut GraphView) -> R,
    ) -> Result<R, ArtifactError> {
        let mut views = self.views.lock().unwrap_or_else(|e| e.into_inner());
        let view = match views.entry(project.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let loader = ProjectLoader::new(self.source.as_ref());
                let records = analysis::load_dependency_records(&loader, project)?;
                let spacing = {
                    let config = self.config.lock().unwrap_or_else(|e| e.into_inner());
                    config.ui.node_spacing
                };
                entry.insert(GraphView::new(DependencyGraph::build(&records), spacing))
            }
        };
        Ok(f(view))
    }

    fn project_groups(&self) -> Result<Vec<ProjectGroup>, ArtifactError> {
        let loader = ProjectLoader::new(self.source.as_ref());
        let projects = loader.projects()?;
        Ok(group_projects(&projects)
            .into_iter()
            .map(|(name, runs)| ProjectGroup { name, runs })
            .collect())
    }

    fn graph_data(&self, project: &str, params: GraphQuery) -> Result<GraphData, ArtifactError> {
        self.with_view(project, |view| {
            view.set_filter(Filter {
                query: params.q,
                vulnerable_only: params.vulnerable,
            });
            if let Some(spacing) = params.spacing {
                view.set_spacing(spacing);
            }
            GraphData::from_view(project, view)
        })
    }

    fn closure(
        &self,
        project: &str,
        coordinate: &str,
    ) -> Result<Option<SelectionClosure>, ArtifactError> {
        self.with_view(project, |view| view.select(coordinate))
    }

    fn tree(
        &self,
        project: &str,
        coordinate: &str,
    ) -> Result<Option<DependencyTreeNode>, ArtifactError> {
        self.with_view(project, |view| project_tree(view.graph(), coordinate))
    }

    fn components(
        &self,
        project: &str,
        ecosystem: Option<&str>,
        risk_level: Option<RiskLevel>,
    ) -> Result<Vec<ComponentRow>, ArtifactError> {
        let loader = ProjectLoader::new(self.source.as_ref());
        let detail = loader.detail(project)?;
        Ok(detail
            .components
            .iter()
            .filter(|c| ecosystem.is_none_or(|wanted| c.ecosystem.as_deref() == Some(wanted)))
            .filter(|c| risk_level.is_none() || c.risk_level() == risk_level)
            .map(|c| ComponentRow {
                unique_id: c.unique_id,
                name: c.name.clone(),
                version: c.version.clone(),
                ecosystem: c.ecosystem.clone(),
                licenses: c.licenses.iter().map(|l| l.license_name.clone()).collect(),
                risk_level: c.risk_level().map(|l| l.key()),
                vulnerability_count: c.vulnerabilities.len(),
            })
            .collect())
    }

    fn component_detail(
        &self,
        project: &str,
        id: u64,
    ) -> Result<Option<ComponentDetail>, ArtifactError> {
        let loader = ProjectLoader::new(self.source.as_ref());
        let detail = loader.detail(project)?;
        let Some(component) = detail
            .components
            .into_iter()
            .find(|c| c.unique_id == Some(id))
        else {
            return Ok(None);
        };
        let dependencies =
            self.with_view(project, |view| link_dependencies(&component, view.graph()))?;
        Ok(Some(ComponentDetail {
            component,
            dependencies,
        }))
    }

    fn summary(&self, project: &str) -> Result<ProjectReport, ArtifactError> {
        let loader = ProjectLoader::new(self.source.as_ref());
        analysis::analyze(&loader, project)
    }

    fn preferences(&self) -> UiPreferences {
        let config = self.config.lock().unwrap_or_else(|e| e.into_inner());
        config.ui
    }

    fn save_preferences(&self, prefs: UiPreferences) -> Result<(), String> {
        let mut config = self.config.lock().unwrap_or_else(|e| e.into_inner());
        config.ui = prefs;
        config.save(&self.config_dir).map_err(|e| e.to_string())
    }
}

/// Start the dashboard server.
pub async fn serve(
    state: AppState,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(state);

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/projects", get(projects_handler))
        .route("/api/{project}/graph", get(graph_handler))
        .route("/api/{project}/components", get(components_handler))
        .route(
            "/api/{project}/components/{id}",
            get(component_detail_handler),
        )
        .route("/api/{project}/closure/{coordinate}", get(closure_handler))
        .route("/api/{project}/tree/{coordinate}", get(tree_handler))
        .route("/api/{project}/summary", get(summary_handler))
        .route("/api/prefs", get(prefs_handler).put(save_prefs_handler))
        .layer(cors)
        .with_state(state);

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    println!("Starting sbomscope dashboard server...");
    println!("Open in browser: {}", url);
    println!("Press Ctrl+C to stop");

    if open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Warning: Could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Artifact loads may do file or blocking HTTP I/O; never run them on the
/// async executor directly.
async fn blocking<T: Send + 'static>(
    state: Arc<AppState>,
    f: impl FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
) -> Result<T, ApiError> {
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| ApiError::internal(format!("worker panicked: {}", e)))?
}

async fn projects_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let groups = blocking(state, |s| Ok(s.project_groups()?)).await?;
    Ok(Json(groups).into_response())
}

async fn graph_handler(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
    Query(params): Query<GraphQuery>,
) -> Result<Response, ApiError> {
    let data = blocking(state, move |s| Ok(s.graph_data(&project, params)?)).await?;
    Ok(Json(data).into_response())
}

async fn components_handler(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
    Query(params): Query<ComponentQuery>,
) -> Result<Response, ApiError> {
    let risk_level = match &params.risk_level {
        Some(raw) => Some(RiskLevel::parse(raw).ok_or_else(|| {
            ApiError::bad_request(format!("unknown risk level '{}'", raw))
        })?),
        None => None,
    };
    let rows = blocking(state, move |s| {
        Ok(s.components(&project, params.ecosystem.as_deref(), risk_level)?)
    })
    .await?;
    Ok(Json(rows).into_response())
}

async fn component_detail_handler(
    State(state): State<Arc<AppState>>,
    Path((project, id)): Path<(String, u64)>,
) -> Result<Response, ApiError> {
    let detail = blocking(state, move |s| Ok(s.component_detail(&project, id)?)).await?;
    match detail {
        Some(d) => Ok(Json(d).into_response()),
        None => Err(ApiError::not_found("unknown component")),
    }
}

async fn closure_handler(
    State(state): State<Arc<AppState>>,
    Path((project, coordinate)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let closure = blocking(state, move |s| Ok(s.closure(&project, &coordinate)?)).await?;
    match closure {
        Some(c) => Ok(Json(c).into_response()),
        None => Err(ApiError::not_found("unknown node")),
    }
}

async fn tree_handler(
    State(state): State<Arc<AppState>>,
    Path((project, coordinate)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let tree = blocking(state, move |s| Ok(s.tree(&project, &coordinate)?)).await?;
    match tree {
        Some(t) => Ok(Json(t).into_response()),
        None => Err(ApiError::not_found("unknown node")),
    }
}

async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Path(project): Path<String>,
) -> Result<Response, ApiError> {
    let report = blocking(state, move |s| Ok(s.summary(&project)?)).await?;
    Ok(Json(report).into_response())
}

async fn prefs_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.preferences())
}

async fn save_prefs_handler(
    State(state): State<Arc<AppState>>,
    Json(prefs): Json<UiPreferences>,
) -> Result<Response, ApiError> {
    let saved =
        blocking(state, move |s| {
            s.save_preferences(prefs).map_err(ApiError::internal)?;
            Ok(prefs)
        })
        .await?;
    Ok(Json(saved).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DirectorySource;
    use crate::fs::mock::MockFs;

    fn state_with(files: Vec<(&'static str, &'static str)>) -> AppState {
        let source = DirectorySource::with_fs("/r", std::sync::Arc::new(MockFs::with_files(files)));
        AppState::new(Box::new(source), Config::default(), PathBuf::from("/tmp"))
    }

    #[test]
    fn view_is_cached_per_project() {
        let state = state_with(vec![(
            "/r/p/dependency.json",
            r#"{"dependencies":[{"ref":"pkg:npm/a@1.0.0","dependsOn":[]}]}"#,
        )]);
        let first = state.graph_data("p", GraphQuery::default()).unwrap();
        assert_eq!(first.nodes.len(), 1);

        // Second request hits the cache and keeps filter state server side.
        let filtered = state
            .graph_data(
                "p",
                GraphQuery {
                    q: "nomatch".to_string(),
                    vulnerable: false,
                    spacing: None,
                },
            )
            .unwrap();
        assert_eq!(filtered.metadata.visible_nodes, 0);
        assert_eq!(filtered.metadata.total_nodes, 1);
    }

    #[test]
    fn closure_of_unknown_node_is_none() {
        let state = state_with(vec![(
            "/r/p/dependency.json",
            r#"{"dependencies":[{"ref":"pkg:npm/a@1.0.0","dependsOn":[]}]}"#,
        )]);
        assert!(state.closure("p", "pkg:npm/missing@1").unwrap().is_none());
    }

    #[test]
    fn components_filter_by_ecosystem_and_risk_level() {
        let state = state_with(vec![(
            "/r/p/sbom-detail.json",
            r#"{"components":[
                {"unique_id":1,"name":"left-pad","version":"1.3.0","ecosystem":"npm",
                 "package_check":[{"Risk Level":"Red"}]},
                {"unique_id":2,"name":"flask","version":"1.1.2","ecosystem":"pypi",
                 "package_check":[{"Risk Level":"Green"}]}
            ]}"#,
        )]);

        assert_eq!(state.components("p", None, None).unwrap().len(), 2);

        let red = state.components("p", None, Some(RiskLevel::Red)).unwrap();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].name, "left-pad");
        assert_eq!(red[0].risk_level, Some("Red"));

        let pypi = state.components("p", Some("pypi"), None).unwrap();
        assert_eq!(pypi.len(), 1);
        assert_eq!(pypi[0].name, "flask");
    }

    #[test]
    fn component_detail_resolves_dependency_ids_or_leaves_them_plain() {
        let state = state_with(vec![
            (
                "/r/p/sbom-detail.json",
                r#"{"components":[
                    {"unique_id":1,"name":"app","version":"1.0.0",
                     "dependencies":["pkg:npm/left-pad@1.3.0","pkg:npm/ghost@0.0.1"]},
                    {"unique_id":2,"name":"left-pad","version":"1.3.0"}
                ]}"#,
            ),
            (
                "/r/p/dependency.json",
                r#"{"dependencies":[
                    {"ref":"pkg:npm/app@1.0.0","unique_id":1,"dependsOn":["pkg:npm/left-pad@1.3.0"]},
                    {"ref":"pkg:npm/left-pad@1.3.0","unique_id":2}
                ]}"#,
            ),
        ]);

        let detail = state.component_detail("p", 1).unwrap().unwrap();
        assert_eq!(detail.component.name, "app");
        assert_eq!(detail.dependencies[0].unique_id, Some(2));
        // Unresolvable coordinate carries no id: rendered as plain text.
        assert_eq!(detail.dependencies[1].coordinate, "pkg:npm/ghost@0.0.1");
        assert_eq!(detail.dependencies[1].unique_id, None);

        assert!(state.component_detail("p", 99).unwrap().is_none());
    }

    #[test]
    fn missing_project_maps_to_not_found() {
        let state = state_with(vec![]);
        let err = state.graph_data("ghost", GraphQuery::default());
        let api: ApiError = err.unwrap_err().into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }
}
