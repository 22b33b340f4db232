//! Per-form submission gate.

/// Mark an idle form as submitting. Returns false, and changes nothing, while
/// an earlier submission of the same form is still in flight.
///
/// Call it from the event handler before spawning the request so a second
/// event sees the flag set, then clear the flag when the request finishes.
pub fn claim_submit(submitting: &mut bool) -> bool {
    if *submitting {
        return false;
    }
    *submitting = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_is_rejected_until_released() {
        let mut submitting = false;
        assert!(claim_submit(&mut submitting));
        assert!(submitting);

        assert!(!claim_submit(&mut submitting));
        assert!(submitting);

        submitting = false;
        assert!(claim_submit(&mut submitting));
    }
}
