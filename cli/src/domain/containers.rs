//! Container status table.

use appdock_common::Container;

/// Running containers first; otherwise the backend's order is kept.
pub fn sort_running_first(containers: &mut [Container]) {
    containers.sort_by_key(|c| !c.is_running());
}

/// Numbered table rows: `#`, name, state, status.
#[must_use]
pub fn status_lines(containers: &[Container]) -> Vec<String> {
    let mut lines = vec![format!("{:<6}{:<30}{:<14}{}", "#", "Name", "State", "Status")];
    for (i, c) in containers.iter().enumerate() {
        lines.push(format!(
            "{:<6}{:<30}{:<14}{}",
            i + 1,
            c.name(),
            c.state,
            c.status
        ));
    }
    lines
}
