//! Reference backend. Everything runs on the CPU: buffers and textures are
//! byte arrays, replay interprets command records, draws are validated and
//! counted but not rasterized. It exists so the whole frontend contract is
//! executable and observable without a GPU.

mod buffer;
mod device;
mod execute;
mod pipeline;
mod query;
mod shader;
mod swapchain;
mod texture;
mod vertex_array;

pub(crate) use buffer::SoftwareBuffer;
pub(crate) use device::{SoftwareApi, SoftwareDeviceContext, SoftwareRootSignature, SoftwareSampler};
pub(crate) use pipeline::SoftwarePipeline;
pub(crate) use query::SoftwareQueryPool;
pub(crate) use shader::{SoftwareProgram, SoftwareShaderModule};
pub(crate) use swapchain::SoftwareSwapchain;
pub(crate) use texture::SoftwareTexture;
pub(crate) use vertex_array::SoftwareVertexArray;
