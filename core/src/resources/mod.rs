//! Resource facades: one namespace per area of the API.
//!
//! A facade borrows the `Client` it was created from and maps each method to
//! a fixed path plus one call into the client's transport core. Facades hold
//! no state of their own and are free to create and drop.

mod app;
mod municipality;
mod resident;
mod rider;

pub use app::AppResource;
pub use municipality::MunicipalityResource;
pub use resident::ResidentResource;
pub use rider::RiderResource;

/// `base/{id}`, or `base/` when there is no id.
pub(crate) fn optional_id_path(base: &str, id: Option<u64>) -> String {
    match id {
        Some(id) => format!("{base}/{id}"),
        None => format!("{base}/"),
    }
}
