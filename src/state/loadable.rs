/// Data fetched from the index, as seen by the views.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }
}

/// A [`Loadable`] plus the generation of the newest request issued for it.
///
/// Responses carry the generation they were requested with; anything older
/// than the latest request is dropped so a slow response can never overwrite
/// a newer one.
#[derive(Debug, Default)]
pub struct Slot<T> {
    generation: u64,
    value: Loadable<T>,
}

impl<T> Slot<T> {
    /// Mark the slot as loading and return the generation to tag the request with.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.value = Loadable::Loading;
        self.generation
    }

    /// Store a response. Returns false when the response was stale and ignored.
    pub fn settle(&mut self, generation: u64, result: Result<T, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.value = match result {
            Ok(value) => Loadable::Ready(value),
            Err(message) => Loadable::Failed(message),
        };
        true
    }

    pub fn get(&self) -> &Loadable<T> {
        &self.value
    }

    pub fn ready(&self) -> Option<&T> {
        self.value.ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_slot_is_loading() {
        let slot: Slot<Vec<u32>> = Slot::default();
        assert!(slot.get().is_loading());
        assert!(slot.ready().is_none());
    }

    #[test]
    fn latest_response_is_stored() {
        let mut slot = Slot::default();
        let generation = slot.begin();
        assert!(slot.settle(generation, Ok(vec![1, 2])));
        assert_eq!(slot.ready(), Some(&vec![1, 2]));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut slot = Slot::default();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.settle(second, Ok("season 66")));
        assert!(!slot.settle(first, Ok("season 65")));
        assert_eq!(slot.ready(), Some(&"season 66"));
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut slot: Slot<u32> = Slot::default();
        let first = slot.begin();
        let _second = slot.begin();
        assert!(!slot.settle(first, Ok(1)));
        assert!(slot.get().is_loading());
    }

    #[test]
    fn failure_is_kept_as_message() {
        let mut slot: Slot<u32> = Slot::default();
        let generation = slot.begin();
        slot.settle(generation, Err("API error".into()));
        assert_eq!(slot.get(), &Loadable::Failed("API error".into()));
    }
}
