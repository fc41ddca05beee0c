//! Tag operations

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

/// Number of most recent tags considered when looking for the previous release
pub const TAG_SCAN_LIMIT: usize = 100;

fn to_utc(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Newest first, ties broken by name descending
fn sort_newest_first(tags: &mut [TagInfo]) {
    tags.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.name.cmp(&a.name))
    });
}

impl GitRepo {
    /// All tags with their creation dates
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag
                let target = tag.target_id().to_string();
                let created = match tag.tagger() {
                    Some(tagger) => to_utc(tagger.when().seconds()),
                    None => self
                        .repo
                        .find_commit(tag.target_id())
                        .map(|c| to_utc(c.time().seconds()))
                        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                };

                let mut info = TagInfo::new(&name, target, created);
                if let Some(msg) = tag.message() {
                    info = info.with_message(msg.trim_end());
                }
                if let Some(tagger) = tag.tagger().and_then(|t| t.name().map(String::from)) {
                    info = info.with_tagger(tagger);
                }
                tags.push(info);
            } else if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(
                    &name,
                    commit.id().to_string(),
                    to_utc(commit.time().seconds()),
                ));
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// The `limit` most recently created tags, newest first
    #[instrument(skip(self))]
    pub fn recent_tags(&self, limit: usize) -> Result<Vec<TagInfo>> {
        let mut tags = self.tags()?;
        sort_newest_first(&mut tags);
        tags.truncate(limit);
        Ok(tags)
    }
}

/// Latest tag belonging to a release line.
///
/// A tag matches when its name starts with `prefix` and contains
/// `tag_version`. The newest match wins; equal dates fall back to the
/// lexicographically greatest name.
pub fn latest_release_tag<'a>(
    tags: &'a [TagInfo],
    prefix: &str,
    tag_version: &str,
) -> Option<&'a TagInfo> {
    tags.iter()
        .filter(|t| t.name.starts_with(prefix) && t.name.contains(tag_version))
        .max_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.name.cmp(&b.name))
        })
}
