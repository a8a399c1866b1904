//! 共享语音库模块：按分面过滤查询，并用种子确定性地选出一个语音。
//!
//! Shared voice library: facet filters, provider records, and the seeded lookup.

mod lookup;
mod select;
mod types;

pub use lookup::{VoiceLibrary, VoiceLookup};
pub use select::select_voice;
pub use types::{
    Age, Category, Descriptive, Gender, QueryFilter, SharedVoicesPage, UseCase, VoiceRecord,
    VoiceSelection, MAX_PAGE_SIZE, SORT_MOST_CLONED,
};
