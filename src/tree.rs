// src/tree.rs
//! Tree building: one nested node per Thing.
//!
//! Call chain:
//! ```text
//! runner → Crawler::build_things_tree → build_tree (per Thing)
//!                                     ↘ project | build_datastream → project
//!                                     ↘ Fetch::fetch
//! ```
//! Order is preserved everywhere: relations in `Relation::ORDER`, members in
//! the order the server returned them. Only the first page of any collection
//! is read.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::CrawlOptions;
use crate::core::Fetch;
use crate::entity::{
    describe, Entity, EntityType, Relation, COLLECTION_VALUE, IOT_NEXT_LINK,
    OBSERVATIONS_NAV_LINK, THING_REQUIRED,
};
use crate::error::{CrawlError, Result};
use crate::progress::Progress;
use crate::project::project;

pub struct Crawler<'p, F: Fetch> {
    fetcher: F,
    include_observations: bool,
    progress: &'p mut dyn Progress,
    relation_fetches: usize,
}

impl<'p, F: Fetch> Crawler<'p, F> {
    pub fn new(fetcher: F, options: &CrawlOptions, progress: &'p mut dyn Progress) -> Self {
        Self {
            fetcher,
            include_observations: options.include_observations,
            progress,
            relation_fetches: 0,
        }
    }

    /// Relation collections fetched so far.
    pub fn relation_fetches(&self) -> usize {
        self.relation_fetches
    }

    /// Fetch the root collection and build a node per Thing, in returned order.
    pub fn build_things_tree(&mut self, things_url: &str) -> Result<Vec<Value>> {
        let things = self.fetch_collection(things_url)?;
        info!(url = things_url, things = things.len(), "root collection fetched");
        self.progress.begin(things.len());

        let mut out = Vec::with_capacity(things.len());
        for (i, thing) in things.iter().enumerate() {
            let thing = as_entity(thing, "Things")?;
            out.push(Value::Object(self.build_tree(thing)?));
            self.progress.thing_done(i, &describe(thing));
        }
        self.progress.finish();
        Ok(out)
    }

    /// Build the node for a single Thing. The copied core fields must all be
    /// present; relations are only added when their navigation link is.
    pub fn build_tree(&mut self, thing: &Entity) -> Result<Entity> {
        let mut node = Map::new();
        for (src, dst) in THING_REQUIRED {
            let v = thing.get(src).ok_or_else(|| CrawlError::MissingField {
                field: src,
                thing: describe(thing),
            })?;
            node.insert(dst.to_string(), v.clone());
        }

        for relation in Relation::ORDER {
            let key = relation.nav_link_key();
            let Some(link) = thing.get(&key) else { continue };
            let url = link.as_str().ok_or_else(|| {
                CrawlError::Shape(format!(
                    "Thing {}: `{key}` is not a URL string: {link}",
                    describe(thing)
                ))
            })?;

            let members = self.fetch_collection(url)?;
            self.relation_fetches += 1;
            self.progress.relation_fetched(self.relation_fetches, relation, url);
            debug!(%relation, url, members = members.len(), "relation fetched");

            let mut children = Vec::with_capacity(members.len());
            for member in &members {
                let member = as_entity(member, relation.as_str())?;
                let child = match relation {
                    Relation::Datastreams => self.build_datastream(member)?,
                    other => project(member, other.entity_type()),
                };
                children.push(Value::Object(child));
            }
            node.insert(relation.as_str().to_string(), Value::Array(children));
        }
        Ok(node)
    }

    /// Project a Datastream and, unless disabled, attach its Observations.
    /// The key is only added when the Datastream carries a non-empty link.
    pub fn build_datastream(&mut self, ds: &Entity) -> Result<Entity> {
        let mut out = project(ds, EntityType::Datastreams);
        if !self.include_observations {
            return Ok(out);
        }
        let link = ds
            .get(OBSERVATIONS_NAV_LINK)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        if let Some(url) = link {
            let observations = self.fetch_collection(url)?;
            let mut projected = Vec::with_capacity(observations.len());
            for obs in &observations {
                let obs = as_entity(obs, "Observations")?;
                projected.push(Value::Object(project(obs, EntityType::Observations)));
            }
            out.insert("Observations".to_string(), Value::Array(projected));
        }
        Ok(out)
    }

    /// GET a collection and take its `value` array; absent or null means empty.
    fn fetch_collection(&mut self, url: &str) -> Result<Vec<Value>> {
        let body = self.fetcher.fetch(url)?;
        let Value::Object(mut body) = body else {
            return Err(CrawlError::Shape(format!("{url} did not return a JSON object")));
        };
        if let Some(next) = body.get(IOT_NEXT_LINK) {
            warn!(url, next = %next, "collection has more pages; only the first is read");
        }
        match body.remove(COLLECTION_VALUE) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(CrawlError::Shape(format!(
                "{url}: `value` is not an array: {other}"
            ))),
        }
    }
}

fn as_entity<'v>(v: &'v Value, what: &str) -> Result<&'v Entity> {
    v.as_object()
        .ok_or_else(|| CrawlError::Shape(format!("{what} member is not an object: {v}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use serde_json::json;
    use std::collections::HashMap;

    struct Canned(HashMap<String, Value>);

    impl Fetch for Canned {
        fn fetch(&mut self, url: &str) -> Result<Value> {
            self.0
                .get(url)
                .cloned()
                .ok_or(CrawlError::Status { url: url.to_string(), status: 404 })
        }
    }

    fn canned(pairs: &[(&str, Value)]) -> Canned {
        Canned(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    fn thing(extra: Value) -> Entity {
        let mut base = json!({
            "@iot.id": 1, "name": "T1", "description": "d",
            "properties": {}, "restricted": false
        });
        if let (Some(b), Value::Object(e)) = (base.as_object_mut(), extra) {
            b.extend(e);
        }
        base.as_object().unwrap().clone()
    }

    #[test]
    fn value_null_is_empty_collection() {
        let mut p = NullProgress;
        let opts = CrawlOptions::full();
        let mut c = Crawler::new(canned(&[("L", json!({ "value": null }))]), &opts, &mut p);
        let node = c.build_tree(&thing(json!({ "Locations@iot.navigationLink": "L" }))).unwrap();
        assert_eq!(node["Locations"], json!([]));
    }

    #[test]
    fn non_string_nav_link_is_fatal() {
        let mut p = NullProgress;
        let opts = CrawlOptions::full();
        let mut c = Crawler::new(canned(&[]), &opts, &mut p);
        let err = c.build_tree(&thing(json!({ "Projects@iot.navigationLink": null })));
        assert!(matches!(err, Err(CrawlError::Shape(_))));
    }

    #[test]
    fn value_must_be_array() {
        let mut p = NullProgress;
        let opts = CrawlOptions::full();
        let mut c = Crawler::new(canned(&[("P", json!({ "value": { "a": 1 } }))]), &opts, &mut p);
        let err = c.build_tree(&thing(json!({ "Projects@iot.navigationLink": "P" })));
        assert!(matches!(err, Err(CrawlError::Shape(_))));
    }

    #[test]
    fn null_core_field_is_copied_not_rejected() {
        let mut p = NullProgress;
        let opts = CrawlOptions::full();
        let mut c = Crawler::new(canned(&[]), &opts, &mut p);
        let node = c.build_tree(&thing(json!({ "properties": null }))).unwrap();
        assert_eq!(node["properties"], Value::Null);
        assert_eq!(c.relation_fetches(), 0);
    }

    #[test]
    fn empty_observation_link_is_not_followed() {
        let mut p = NullProgress;
        let opts = CrawlOptions::full();
        let mut c = Crawler::new(canned(&[]), &opts, &mut p);
        let ds = json!({ "@iot.id": 5, "Observations@iot.navigationLink": "" });
        let out = c.build_datastream(ds.as_object().unwrap()).unwrap();
        assert!(!out.contains_key("Observations"));
    }
}
