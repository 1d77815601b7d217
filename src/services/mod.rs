pub mod pipeline;
pub mod rendered_reader;
pub mod report;
pub mod styling_loader;

pub use pipeline::ValidationPipeline;
pub use rendered_reader::{parse_color_table, RenderedPaletteReader, COLOR_TABLE_MARKER};
pub use report::{
    system_hostname, truncate_message, MemoryEmitter, NullEmitter, ReportEmitter, ReportEvent,
    SigeventEmitter,
};
pub use styling_loader::{parse_styling_document, StylingPaletteLoader};
