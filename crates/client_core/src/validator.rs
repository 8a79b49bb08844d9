/// Whether a draft may be submitted: anything except empty or whitespace-only text.
pub fn can_submit(draft_text: &str) -> bool {
    !draft_text.trim().is_empty()
}
