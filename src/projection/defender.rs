use std::collections::HashMap;

/// Picks the most likely defender for a position: the first healthy
/// name on the ranked depth chart. When everyone listed is out, the
/// top of the chart is still the best guess.
pub fn estimate_defender<'a>(
    position: &str,
    depth_chart: &'a HashMap<String, Vec<String>>,
    injured: &[String],
) -> Option<&'a str> {
    let candidates = depth_chart.get(position)?;
    candidates
        .iter()
        .find(|name| !injured.contains(name))
        .or_else(|| candidates.first())
        .map(String::as_str)
}
