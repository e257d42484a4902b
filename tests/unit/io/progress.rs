//! Tests for the attempt progress bar

#[cfg(test)]
mod tests {
    use bitart::io::progress::AttemptProgress;

    // Tests a quiet bar reports the last recorded attempt when finished
    // Verified by returning the position after clearing the bar
    #[test]
    fn test_finish_reports_recorded_attempts() {
        let progress = AttemptProgress::new(20, true);

        progress.update(3, "Solid colour");
        progress.update(4, "Accepted");

        assert_eq!(progress.finish(), 4);
    }

    // Tests a bar finished before any attempt reports zero
    // Verified by returning the bar length from finish
    #[test]
    fn test_finish_without_attempts() {
        let progress = AttemptProgress::new(20, true);

        assert_eq!(progress.finish(), 0);
    }
}
