//! Tags in memory.

use super::{find_id_by_name, next_id, FakeConnector, FakeTables};
use crate::error::DbResult;
use crate::fixtures::Tag;
use crate::traits::{check_name, TagsConnector};
use async_trait::async_trait;

impl FakeTables {
    pub(super) fn find_tag_id(&mut self, name: &str) -> DbResult<i64> {
        check_name("tag", name)?;
        if let Some(id) = find_id_by_name(&self.tags, name) {
            return Ok(id);
        }
        let id = next_id(&self.tags);
        self.tags.insert(id, Tag::new(id, name));
        Ok(id)
    }
}

#[async_trait]
impl TagsConnector for FakeConnector {
    async fn find_tag_id(&self, name: &str) -> DbResult<i64> {
        self.transaction(|tables| tables.find_tag_id(name))
    }
}
