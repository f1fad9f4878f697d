//! Builders in memory.

use super::{find_id_by_name, next_id, require_row, FakeConnector, FakeTables};
use crate::error::{DbError, DbResult};
use crate::fixtures::Builder;
use crate::traits::{check_name, BuildersConnector};
use async_trait::async_trait;
use fm_core::BuilderRecord;
use std::collections::BTreeSet;

impl FakeTables {
    fn builder_record(&self, builder: &Builder) -> BuilderRecord {
        let masterids = self
            .builder_masters
            .range((builder.id, i64::MIN)..=(builder.id, i64::MAX))
            .map(|(_, masterid)| *masterid)
            .collect();

        let mut tags: Vec<String> = self
            .builders_tags
            .range((builder.id, i64::MIN)..=(builder.id, i64::MAX))
            .filter_map(|(_, tagid)| self.tags.get(tagid))
            .map(|tag| tag.name.clone())
            .collect();
        tags.sort();
        tags.dedup();

        BuilderRecord {
            id: builder.id,
            name: builder.name.clone(),
            description: builder.description.clone(),
            projectid: builder.projectid,
            masterids,
            tags,
        }
    }

    fn is_linked_to(&self, builderid: i64, masterid: i64) -> bool {
        self.builder_masters.contains(&(builderid, masterid))
    }

    fn update_builder_info(
        &mut self,
        builderid: i64,
        description: Option<&str>,
        projectid: Option<i64>,
        tags: &[String],
    ) -> DbResult<()> {
        if !self.builders.contains_key(&builderid) {
            return Err(DbError::NotFound {
                kind: "builder",
                id: builderid,
            });
        }
        if let Some(projectid) = projectid {
            require_row(&self.projects, "project", projectid)?;
        }

        let mut wanted = BTreeSet::new();
        for tag in tags {
            wanted.insert(self.find_tag_id(tag)?);
        }

        if let Some(builder) = self.builders.get_mut(&builderid) {
            builder.description = description.map(str::to_string);
            builder.projectid = projectid;
        }
        self.builders_tags.retain(|(b, _)| *b != builderid);
        self.builders_tags
            .extend(wanted.into_iter().map(|tagid| (builderid, tagid)));
        Ok(())
    }
}

#[async_trait]
impl BuildersConnector for FakeConnector {
    async fn find_builder_id(&self, name: &str, auto_create: bool) -> DbResult<Option<i64>> {
        self.transaction(|tables| {
            check_name("builder", name)?;
            if let Some(id) = find_id_by_name(&tables.builders, name) {
                return Ok(Some(id));
            }
            if !auto_create {
                return Ok(None);
            }
            let id = next_id(&tables.builders);
            tables.builders.insert(id, Builder::new(id).name(name));
            Ok(Some(id))
        })
    }

    async fn add_builder_master(&self, builderid: i64, masterid: i64) -> DbResult<()> {
        self.transaction(|tables| {
            require_row(&tables.builders, "builder", builderid)?;
            require_row(&tables.masters, "master", masterid)?;
            tables.builder_masters.insert((builderid, masterid));
            Ok(())
        })
    }

    async fn remove_builder_master(&self, builderid: i64, masterid: i64) -> DbResult<()> {
        self.transaction(|tables| {
            tables.builder_masters.remove(&(builderid, masterid));
            Ok(())
        })
    }

    async fn get_builder(&self, builderid: i64) -> DbResult<Option<BuilderRecord>> {
        self.read(|tables| {
            Ok(tables
                .builders
                .get(&builderid)
                .map(|builder| tables.builder_record(builder)))
        })
    }

    async fn get_builders(
        &self,
        masterid: Option<i64>,
        projectid: Option<i64>,
    ) -> DbResult<Vec<BuilderRecord>> {
        self.read(|tables| {
            Ok(tables
                .builders
                .values()
                .filter(|b| masterid.map_or(true, |m| tables.is_linked_to(b.id, m)))
                .filter(|b| projectid.map_or(true, |p| b.projectid == Some(p)))
                .map(|b| tables.builder_record(b))
                .collect())
        })
    }

    async fn update_builder_info(
        &self,
        builderid: i64,
        description: Option<&str>,
        projectid: Option<i64>,
        tags: &[String],
    ) -> DbResult<()> {
        self.transaction(|tables| {
            tables.update_builder_info(builderid, description, projectid, tags)
        })
    }
}
