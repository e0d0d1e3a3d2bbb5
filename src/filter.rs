use crate::config::FilterConfig;
use crate::normalize::comparison_key;

/// Row selection for the generation pipeline: a source row is synchronized
/// when its remark carries the include tag without the exclude tag and its
/// team assignment matches.
#[derive(Debug, Clone)]
pub struct RowFilter {
    include_tag: String,
    exclude_tag: String,
    team_value: String,
}

impl RowFilter {
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            include_tag: config.include_tag.clone(),
            exclude_tag: config.exclude_tag.clone(),
            team_value: config.team_value.clone(),
        }
    }

    pub fn selects(&self, remark: &str, team: &str) -> bool {
        // The exclude tag is checked first so a tag like "#SYNC-EXCLUDE"
        // never counts as carrying "#SYNC".
        if !self.exclude_tag.is_empty() && remark.contains(&self.exclude_tag) {
            return false;
        }
        if !remark.contains(&self.include_tag) {
            return false;
        }
        comparison_key(team) == comparison_key(&self.team_value)
    }
}
