//! Projects in memory.

use super::{find_id_by_name, next_id, FakeConnector};
use crate::error::DbResult;
use crate::fixtures::Project;
use crate::traits::{check_name, ProjectsConnector};
use async_trait::async_trait;
use fm_core::ProjectRecord;

fn to_record(project: &Project) -> ProjectRecord {
    ProjectRecord {
        id: project.id,
        name: project.name.clone(),
    }
}

#[async_trait]
impl ProjectsConnector for FakeConnector {
    async fn find_project_id(&self, name: &str, auto_create: bool) -> DbResult<Option<i64>> {
        self.transaction(|tables| {
            check_name("project", name)?;
            if let Some(id) = find_id_by_name(&tables.projects, name) {
                return Ok(Some(id));
            }
            if !auto_create {
                return Ok(None);
            }
            let id = next_id(&tables.projects);
            tables.projects.insert(id, Project::new(id).name(name));
            Ok(Some(id))
        })
    }

    async fn get_project(&self, projectid: i64) -> DbResult<Option<ProjectRecord>> {
        self.read(|tables| Ok(tables.projects.get(&projectid).map(to_record)))
    }

    async fn get_projects(&self) -> DbResult<Vec<ProjectRecord>> {
        self.read(|tables| Ok(tables.projects.values().map(to_record).collect()))
    }
}
