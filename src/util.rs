/// Returns the first candidate, in priority order, that is present.
///
/// Used for the "primary band, else new band" fallback and for picking the
/// most recent sighting that actually carries a trap code.
pub fn first_present<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    candidates.into_iter().flatten().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_present_in_priority_order() {
        assert_eq!(first_present([None, Some(2), Some(3)]), Some(2));
        assert_eq!(first_present([Some(1), Some(2)]), Some(1));
        let absent: [Option<i32>; 2] = [None, None];
        assert_eq!(first_present(absent), None);
        assert_eq!(first_present(Vec::<Option<i32>>::new()), None);
    }
}
