use crate::ingest::GateOutcome;

/// "no new events", "1 new event", "3 new events".
pub fn no(count: usize, noun: &str) -> String {
    match count {
        0 => format!("no {}s", noun),
        1 => format!("1 {}", noun),
        n => format!("{} {}s", n, noun),
    }
}

pub fn summary(outcome: &GateOutcome) -> String {
    let r = outcome.result();
    let lines = [
        format!("{} added", no(r.added, "new event")),
        format!("{} updated", no(r.updated, "event")),
        format!("{} skipped", no(r.skipped, "record")),
    ];
    match outcome {
        GateOutcome::Committed(_) => lines.join("\n"),
        GateOutcome::Vetoed(_) => format!(
            "Changes discarded, nothing was committed. Would have been:\n{}",
            lines.join("\n")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ReconciliationResult;

    #[test]
    fn pluralises() {
        assert_eq!(no(0, "new event"), "no new events");
        assert_eq!(no(1, "event"), "1 event");
        assert_eq!(no(12, "record"), "12 records");
    }

    #[test]
    fn committed_summary() {
        let outcome = GateOutcome::Committed(ReconciliationResult {
            added: 3,
            updated: 1,
            skipped: 0,
        });
        assert_eq!(
            summary(&outcome),
            "3 new events added\n1 event updated\nno records skipped"
        );
    }

    #[test]
    fn vetoed_summary_is_hypothetical() {
        let outcome = GateOutcome::Vetoed(ReconciliationResult {
            added: 0,
            updated: 2,
            skipped: 1,
        });
        let text = summary(&outcome);
        assert!(text.starts_with("Changes discarded"));
        assert!(text.ends_with("no new events added\n2 events updated\n1 record skipped"));
    }
}
