//! Frequency Analyzer
//!
//! Pure aggregation over a user's historical tasks: category ranking,
//! modal priority, and the duration bucket. No I/O, deterministic for a
//! given input ordering.

use taskmind_core::{Priority, Task};

/// Categories surfaced to the extraction bias, at most this many
pub const TOP_CATEGORIES: usize = 5;

/// Frequency statistics derived from a task history.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyProfile {
    /// Distinct categories ranked by descending occurrence count, ties
    /// broken by the order they first appeared in the input
    pub common_categories: Vec<String>,
    /// The single highest-frequency priority, Medium when empty
    pub most_used_priority: Priority,
    /// "2h" if any task carries a non-empty duration, else "1h".
    /// A coarse bucket, not a true mean; kept as observed behavior.
    pub average_duration: String,
}

/// Analyze an ordered task history.
pub fn analyze(tasks: &[Task]) -> FrequencyProfile {
    FrequencyProfile {
        common_categories: rank_categories(tasks),
        most_used_priority: modal_priority(tasks),
        average_duration: duration_bucket(tasks),
    }
}

/// Rank non-blank categories by count, first-seen order as tie-break,
/// truncated to `TOP_CATEGORIES`.
fn rank_categories(tasks: &[Task]) -> Vec<String> {
    // First-seen insertion order; the stable sort below preserves it
    // among equal counts.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for task in tasks {
        let category = task.category.trim();
        if category.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|(name, _)| name)
        .collect()
}

/// The priority with the highest occurrence count. Ties go to the value
/// seen first; an empty history yields Medium.
fn modal_priority(tasks: &[Task]) -> Priority {
    let mut counts: Vec<(Priority, usize)> = Vec::new();
    for task in tasks {
        match counts.iter_mut().find(|(p, _)| *p == task.priority) {
            Some((_, count)) => *count += 1,
            None => counts.push((task.priority, 1)),
        }
    }
    let mut best: Option<(Priority, usize)> = None;
    for (priority, count) in counts {
        // Strictly greater keeps the first-seen value on ties
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((priority, count));
        }
    }
    best.map(|(p, _)| p).unwrap_or(Priority::Medium)
}

fn duration_bucket(tasks: &[Task]) -> String {
    let any_duration = tasks
        .iter()
        .any(|t| !t.estimated_duration.trim().is_empty());
    if any_duration { "2h" } else { "1h" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmind_core::Status;

    fn task(category: &str, priority: Priority, duration: &str) -> Task {
        Task {
            id: format!("id-{}-{}", category, duration),
            summary: format!("{} task", category),
            description: None,
            due_date: "2026-09-01T09:00:00Z".to_string(),
            estimated_duration: duration.to_string(),
            priority,
            status: Status::ToDo,
            category: category.to_string(),
            external_links: vec![],
            folder_id: None,
            created_at: "2026-08-25T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_empty_history_defaults() {
        let profile = analyze(&[]);
        assert!(profile.common_categories.is_empty());
        assert_eq!(profile.most_used_priority, Priority::Medium);
        assert_eq!(profile.average_duration, "1h");
    }

    #[test]
    fn test_categories_ranked_by_frequency() {
        let mut tasks = Vec::new();
        for _ in 0..12 {
            tasks.push(task("Work", Priority::High, "2h"));
        }
        for _ in 0..5 {
            tasks.push(task("Home", Priority::Low, "1h"));
        }
        for _ in 0..3 {
            tasks.push(task("Other", Priority::Medium, ""));
        }
        let profile = analyze(&tasks);
        assert_eq!(profile.common_categories, vec!["Work", "Home", "Other"]);
    }

    #[test]
    fn test_category_ties_break_by_first_seen() {
        let tasks = vec![
            task("Errands", Priority::Medium, ""),
            task("Fitness", Priority::Medium, ""),
            task("Errands", Priority::Medium, ""),
            task("Fitness", Priority::Medium, ""),
        ];
        let profile = analyze(&tasks);
        assert_eq!(profile.common_categories, vec!["Errands", "Fitness"]);
    }

    #[test]
    fn test_categories_truncated_to_five_without_duplicates() {
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let mut tasks = Vec::new();
        for (i, name) in names.iter().enumerate() {
            // Descending counts so the ranking is unambiguous
            for _ in 0..(names.len() - i) {
                tasks.push(task(name, Priority::Medium, ""));
            }
        }
        let profile = analyze(&tasks);
        assert_eq!(profile.common_categories.len(), TOP_CATEGORIES);
        assert_eq!(profile.common_categories, vec!["A", "B", "C", "D", "E"]);
        let mut deduped = profile.common_categories.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), profile.common_categories.len());
    }

    #[test]
    fn test_blank_categories_are_skipped() {
        let tasks = vec![task("", Priority::Medium, ""), task("  ", Priority::Medium, "")];
        let profile = analyze(&tasks);
        assert!(profile.common_categories.is_empty());
    }

    #[test]
    fn test_modal_priority() {
        let tasks = vec![
            task("Work", Priority::High, ""),
            task("Work", Priority::High, ""),
            task("Home", Priority::Low, ""),
        ];
        assert_eq!(analyze(&tasks).most_used_priority, Priority::High);
    }

    #[test]
    fn test_modal_priority_tie_goes_to_first_seen() {
        let tasks = vec![
            task("Work", Priority::Low, ""),
            task("Home", Priority::High, ""),
        ];
        assert_eq!(analyze(&tasks).most_used_priority, Priority::Low);
    }

    #[test]
    fn test_duration_bucket_with_any_data() {
        let tasks = vec![task("Work", Priority::Medium, ""), task("Home", Priority::Medium, "3h")];
        assert_eq!(analyze(&tasks).average_duration, "2h");
    }

    #[test]
    fn test_duration_bucket_without_data() {
        let tasks = vec![task("Work", Priority::Medium, ""), task("Home", Priority::Medium, "  ")];
        assert_eq!(analyze(&tasks).average_duration, "1h");
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let tasks = vec![
            task("Work", Priority::High, "2h"),
            task("Home", Priority::Low, ""),
        ];
        assert_eq!(analyze(&tasks), analyze(&tasks));
    }
}
