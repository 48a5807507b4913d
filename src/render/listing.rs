//! Index listing: drop undated posts, map the rest to summaries

use crate::query::PostNode;

use super::PostSummary;

/// A post is listed only when it has a non-empty publish date
pub fn is_listed(node: &PostNode) -> bool {
    node.date.as_deref().is_some_and(|d| !d.is_empty())
}

/// Summaries for every listed node, in input order
///
/// The input is trusted to be sorted already; nothing is re-ordered.
pub fn post_summaries<'a, I>(nodes: I) -> impl Iterator<Item = PostSummary> + 'a
where
    I: IntoIterator<Item = &'a PostNode>,
    I::IntoIter: 'a,
{
    nodes
        .into_iter()
        .filter(|node| is_listed(node))
        .map(PostSummary::from_node)
}
