// Copyright 2024 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Key layout of a Vitastor cluster under its etcd prefix.

/// Default etcd key prefix of a Vitastor cluster.
pub const DEFAULT_PREFIX: &str = "/vitastor";

/// Builds the keys and key ranges the collectors read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    prefix: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl KeyLayout {
    /// `prefix` is normalised to start with `/` and not end with one. An
    /// empty prefix (or `/`) places the tree at the root of the keyspace.
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_end_matches('/');
        let prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn pool_config(&self) -> String {
        format!("{}/config/pools", self.prefix)
    }

    pub fn pool_stats(&self, pool_id: &str) -> String {
        format!("{}/pool/stats/{}", self.prefix, pool_id)
    }

    pub fn osd_state_dir(&self) -> String {
        format!("{}/osd/state/", self.prefix)
    }

    pub fn osd_stats_dir(&self) -> String {
        format!("{}/osd/stats/", self.prefix)
    }

    pub fn mon_master(&self) -> String {
        format!("{}/mon/master", self.prefix)
    }

    pub fn mon_member_dir(&self) -> String {
        format!("{}/mon/member/", self.prefix)
    }

    pub fn image_stats_dir(&self, pool_id: &str) -> String {
        format!("{}/inode/stats/{}/", self.prefix, pool_id)
    }

    pub fn global_stats(&self) -> String {
        format!("{}/stats", self.prefix)
    }
}

/// First path segment of `key` below `dir`, e.g. the OSD number of
/// `/vitastor/osd/stats/12` below `/vitastor/osd/stats/`.
pub fn child_id<'a>(key: &'a str, dir: &str) -> Option<&'a str> {
    key.strip_prefix(dir)?.split('/').next().filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_normalisation() {
        assert_eq!(KeyLayout::new("/vitastor").prefix(), "/vitastor");
        assert_eq!(KeyLayout::new("vitastor/").prefix(), "/vitastor");
        assert_eq!(KeyLayout::new("/a/b//").prefix(), "/a/b");
        assert_eq!(KeyLayout::default().prefix(), DEFAULT_PREFIX);
        assert_eq!(KeyLayout::new("/").pool_config(), "/config/pools");
    }

    #[test]
    fn test_layout_paths() {
        let layout = KeyLayout::new("/vitastor");
        assert_eq!(layout.pool_config(), "/vitastor/config/pools");
        assert_eq!(layout.pool_stats("1"), "/vitastor/pool/stats/1");
        assert_eq!(layout.osd_state_dir(), "/vitastor/osd/state/");
        assert_eq!(layout.osd_stats_dir(), "/vitastor/osd/stats/");
        assert_eq!(layout.mon_master(), "/vitastor/mon/master");
        assert_eq!(layout.mon_member_dir(), "/vitastor/mon/member/");
        assert_eq!(layout.image_stats_dir("2"), "/vitastor/inode/stats/2/");
        assert_eq!(layout.global_stats(), "/vitastor/stats");
    }

    #[test]
    fn test_child_id() {
        assert_eq!(child_id("/vitastor/osd/stats/12", "/vitastor/osd/stats/"), Some("12"));
        assert_eq!(child_id("/vitastor/inode/stats/1/5/extra", "/vitastor/inode/stats/1/"), Some("5"));
        assert_eq!(child_id("/vitastor/osd/stats/", "/vitastor/osd/stats/"), None);
        assert_eq!(child_id("/other/osd/stats/1", "/vitastor/osd/stats/"), None);
    }

    #[test]
    fn test_multi_segment_prefix() {
        let layout = KeyLayout::new("/clusters/east/vitastor");
        let key = "/clusters/east/vitastor/osd/stats/7";
        assert_eq!(child_id(key, &layout.osd_stats_dir()), Some("7"));
    }
}
