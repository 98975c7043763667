// Pipeline processing: record mapping and filtering

pub mod mapper;
pub mod transform;

pub use mapper::{display_name, present, EntryMapper, SecondPhone};
pub use transform::{to_contact_book, ContactBook, TransformStats};
