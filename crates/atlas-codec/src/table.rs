// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node-id lookup table.
use atlas_graph::RankTable;

use crate::error::EncodeError;

/// Renders rank order as newline-joined ids, without a trailing newline.
///
/// # Errors
/// [`EncodeError::UnrepresentableId`] for an id containing `\n`.
pub fn render_node_table(rank: &RankTable) -> Result<String, EncodeError> {
    if let Some(id) = rank.ids().iter().find(|id| id.contains('\n')) {
        return Err(EncodeError::UnrepresentableId { id: id.clone() });
    }
    Ok(rank.ids().join("\n"))
}

/// Splits a node table into ids. Empty text is an empty table.
pub fn parse_node_table(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_owned).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use atlas_graph::{rank, Attributes, Graph};

    use super::*;

    #[test]
    fn renders_in_rank_order() {
        let mut g = Graph::new();
        g.add_node("solo", Attributes::new());
        g.add_link("x", "hub", Attributes::new());
        g.add_link("y", "hub", Attributes::new());
        let text = render_node_table(&rank(&g)).unwrap();
        assert_eq!(text, "hub\nx\ny\nsolo");
        assert_eq!(parse_node_table(&text), ["hub", "x", "y", "solo"]);
    }

    #[test]
    fn rejects_line_breaks_in_ids() {
        let mut g = Graph::new();
        g.add_node("two\nlines", Attributes::new());
        assert!(matches!(
            render_node_table(&rank(&g)),
            Err(EncodeError::UnrepresentableId { .. })
        ));
    }

    #[test]
    fn empty_ids_survive_between_others() {
        assert_eq!(parse_node_table("a\n\nb"), ["a", "", "b"]);
        assert!(parse_node_table("").is_empty());
    }
}
