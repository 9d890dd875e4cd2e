use crate::define_index_newtype;

define_index_newtype!(StopIdx);

impl StopIdx {
    /// Row and column of this stop in the travel-time matrix.
    pub const fn location_id(&self) -> usize {
        self.get()
    }
}
