use std::hash::{Hash, Hasher};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Hash/compare helper for the f32 fields inside state snapshots. Bit-exact
/// semantics, so two states built from the same constants always hash alike.
#[derive(Copy, Clone)]
pub(crate) struct DecimalF32(pub f32);

impl PartialEq for DecimalF32 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for DecimalF32 {}

impl Hash for DecimalF32 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// A 2d size for windows, textures, etc.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Extents2D {
    pub width: u32,
    pub height: u32,
}

/// A 3d size for windows, textures, etc.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Extents3D {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extents3D {
    pub fn to_2d(self) -> Extents2D {
        Extents2D {
            width: self.width,
            height: self.height,
        }
    }
}

/// Category tag carried by every resource, used in diagnostics and for the
/// per-category dense-ID pools.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceType {
    VertexBuffer,
    IndexBuffer,
    UniformBuffer,
    StructuredBuffer,
    IndirectBuffer,
    StagingBuffer,
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture3D,
    TextureCube,
    TextureCubeArray,
    Sampler,
    VertexArray,
    VertexShader,
    TessellationControlShader,
    TessellationEvaluationShader,
    GeometryShader,
    FragmentShader,
    TaskShader,
    MeshShader,
    ComputeShader,
    GraphicsProgram,
    ComputeProgram,
    RootSignature,
    ResourceGroup,
    RenderPass,
    Framebuffer,
    GraphicsPipelineState,
    ComputePipelineState,
    QueryPool,
    Swapchain,
    CommandBuffer,
}

/// Number of MSAA samples to use. 1x and 4x are most broadly supported
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum SampleCount {
    SampleCount1,
    SampleCount2,
    SampleCount4,
    SampleCount8,
    SampleCount16,
}

impl Default for SampleCount {
    fn default() -> Self {
        Self::SampleCount1
    }
}

impl SampleCount {
    pub fn as_u32(self) -> u32 {
        match self {
            Self::SampleCount1 => 1,
            Self::SampleCount2 => 2,
            Self::SampleCount4 => 4,
            Self::SampleCount8 => 8,
            Self::SampleCount16 => 16,
        }
    }
}

bitflags::bitflags! {
    /// Indicates how a buffer or texture may be used. Several flags may be
    /// combined; the buffer-only and texture-only groups are mutually
    /// exclusive per resource.
    #[derive(Default)]
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
    pub struct ResourceUsage: u16 {
        // buffer
        const AS_CONST_BUFFER = 0x0001;
        // buffer/texture
        const AS_SHADER_RESOURCE = 0x0002;
        // buffer/texture
        const AS_UNORDERED_ACCESS = 0x0004;
        // texture
        const AS_RENDER_TARGET = 0x0008;
        // texture
        const AS_DEPTH_STENCIL = 0x0010;
        // buffer
        const AS_VERTEX_BUFFER = 0x0020;
        // buffer
        const AS_INDEX_BUFFER = 0x0040;
        // buffer
        const AS_INDIRECT_BUFFER = 0x0080;
        // meta
        const BUFFER_ONLY_USAGE_FLAGS =
            Self::AS_CONST_BUFFER.bits |
            Self::AS_VERTEX_BUFFER.bits |
            Self::AS_INDEX_BUFFER.bits |
            Self::AS_INDIRECT_BUFFER.bits;
        const TEXTURE_ONLY_USAGE_FLAGS =
            Self::AS_RENDER_TARGET.bits |
            Self::AS_DEPTH_STENCIL.bits;
    }
}

bitflags::bitflags! {
    /// Creation-time behavior flags, only consulted while the resource is
    /// being constructed.
    #[derive(Default)]
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
    pub struct ResourceCreation: u8 {
        /// Initial data is laid out mip-major: every slice/face of mip 0,
        /// then every slice/face of mip 1, down to 1x1.
        const DATA_CONTAINS_MIPMAPS = 0x01;
        /// Synthesize mip levels 1..n from level 0 after upload.
        const GENERATE_MIPMAPS = 0x02;
    }
}

bitflags::bitflags! {
    /// Structural flags for textures.
    #[derive(Default)]
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
    pub struct ResourceFlags: u32 {
        const TEXTURE_CUBE = 1 << 12;
    }
}

bitflags::bitflags! {
    /// Flags for enabling/disabling color channels, used with `BlendState`
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
    pub struct ColorFlags: u8 {
        const RED = 1;
        const GREEN = 2;
        const BLUE = 4;
        const ALPHA = 8;
        const ALL = 0x0F;
    }
}

impl Default for ColorFlags {
    fn default() -> Self {
        Self::ALL
    }
}

bitflags::bitflags! {
    /// Indicates what render targets are affected by a blend state
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
    pub struct BlendStateTargets : u8 {
        const BLEND_STATE_TARGET_0 = 0x01;
        const BLEND_STATE_TARGET_1 = 0x02;
        const BLEND_STATE_TARGET_2 = 0x04;
        const BLEND_STATE_TARGET_3 = 0x08;
        const BLEND_STATE_TARGET_4 = 0x10;
        const BLEND_STATE_TARGET_5 = 0x20;
        const BLEND_STATE_TARGET_6 = 0x40;
        const BLEND_STATE_TARGET_7 = 0x80;
        const BLEND_STATE_TARGET_ALL = 0xFF;
    }
}

bitflags::bitflags! {
    /// Which aspects of the bound render target a clear record affects.
    pub struct ClearFlags: u8 {
        const COLOR = 1;
        const DEPTH = 2;
        const STENCIL = 4;
    }
}

bitflags::bitflags! {
    /// Indicates a particular stage of a shader, or set of stages in a
    /// shader.
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
    pub struct ShaderStageFlags : u32 {
        const VERTEX = 1;
        const TESSELLATION_CONTROL = 2;
        const TESSELLATION_EVALUATION = 4;
        const GEOMETRY = 8;
        const FRAGMENT = 16;
        const COMPUTE = 32;
        const TASK = 64;
        const MESH = 128;
        const ALL_GRAPHICS = 0x1F;
        const ALL = 0x7FFF_FFFF;
    }
}

/// Contains all the individual stages
pub const ALL_SHADER_STAGE_FLAGS: [ShaderStageFlags; 8] = [
    ShaderStageFlags::VERTEX,
    ShaderStageFlags::TESSELLATION_CONTROL,
    ShaderStageFlags::TESSELLATION_EVALUATION,
    ShaderStageFlags::GEOMETRY,
    ShaderStageFlags::FRAGMENT,
    ShaderStageFlags::TASK,
    ShaderStageFlags::MESH,
    ShaderStageFlags::COMPUTE,
];

/// Indicates the type of pipeline, roughly corresponds with the program
/// family bound to it
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PipelineType {
    Graphics = 0,
    Compute = 1,
}

/// Indicates how the memory will be accessed and affects where in memory it
/// needs to be allocated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum MemoryUsage {
    Unknown,

    /// The memory is only accessed by the GPU
    GpuOnly,

    /// The memory is only accessed by the CPU
    CpuOnly,

    /// The memory is written by the CPU and read by the GPU
    CpuToGpu,

    /// The memory is written by the GPU and read by the CPU
    GpuToCpu,
}

impl Default for MemoryUsage {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Indicates the result of presenting a swapchain image
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PresentSuccessResult {
    /// The image was shown and the swapchain can continue to be used.
    Success,

    /// The image was shown but the swapchain would benefit from being
    /// rebuilt (for example after a window resize the backend absorbed).
    SuccessSuboptimal,

    /// The swapchain can no longer be used and must be recreated.
    DeviceReset,
}

/// Which corner texture coordinates originate from on the active backend.
/// Callers branch on this before building UV data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureOrigin {
    UpperLeft,
    LowerLeft,
}

/// Affects how quickly vertex attributes are consumed from buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeRate {
    Vertex,
    Instance,
}

impl Default for VertexAttributeRate {
    fn default() -> Self {
        Self::Vertex
    }
}

/// How to interpret vertex data into a form of geometry. `PatchList`
/// carries its control-point count (1..=32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    PatchList(u8),
}

/// The size of index buffer elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum IndexType {
    Uint32,
    Uint16,
}

impl Default for IndexType {
    fn default() -> Self {
        Self::Uint32
    }
}

/// Affects blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    SrcAlphaSaturate,
    ConstantColor,
    OneMinusConstantColor,
}

impl Default for BlendFactor {
    fn default() -> Self {
        Self::Zero
    }
}

/// Affects blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum BlendOp {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

impl Default for BlendOp {
    fn default() -> Self {
        Self::Add
    }
}

/// Affects depth testing and sampling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

impl Default for CompareOp {
    fn default() -> Self {
        Self::Never
    }
}

/// Similar to a stencil op in any backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrementAndClamp,
    DecrementAndClamp,
    Invert,
    IncrementAndWrap,
    DecrementAndWrap,
}

impl Default for StencilOp {
    fn default() -> Self {
        Self::Keep
    }
}

/// Determines if we cull polygons that are front-facing, back-facing, or
/// neither
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum CullMode {
    None,
    Back,
    Front,
}

impl Default for CullMode {
    fn default() -> Self {
        Self::None
    }
}

/// Determines what winding order is considered the front face of a polygon
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum FrontFace {
    CounterClockwise,
    Clockwise,
}

impl Default for FrontFace {
    fn default() -> Self {
        Self::CounterClockwise
    }
}

/// Whether to fill in polygons or not
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum FillMode {
    Solid,
    Wireframe,
}

impl Default for FillMode {
    fn default() -> Self {
        Self::Solid
    }
}

/// Filtering method when sampling
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum FilterType {
    Nearest,
    Linear,
}

impl Default for FilterType {
    fn default() -> Self {
        Self::Nearest
    }
}

/// Affects image sampling, particularly for UV coordinates outside the
/// [0, 1] range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum AddressMode {
    Mirror,
    Repeat,
    ClampToEdge,
    ClampToBorder,
}

impl Default for AddressMode {
    fn default() -> Self {
        Self::Repeat
    }
}

/// Affects mip selection when sampling
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum MipMapMode {
    Nearest,
    Linear,
}

impl Default for MipMapMode {
    fn default() -> Self {
        Self::Nearest
    }
}

/// A clear value for color attachments
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ColorClearValue(pub [f32; 4]);

impl Hash for ColorClearValue {
    fn hash<H: Hasher>(&self, mut state: &mut H) {
        for &value in &self.0 {
            DecimalF32(value).hash(&mut state);
        }
    }
}

/// A clear value for depth/stencil attachments. One or both values may be
/// used depending on the format of the attached image
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthStencilClearValue {
    pub depth: f32,
    pub stencil: u32,
}

impl Default for DepthStencilClearValue {
    fn default() -> Self {
        Self {
            depth: 0.0,
            stencil: 0,
        }
    }
}

impl Hash for DepthStencilClearValue {
    fn hash<H: Hasher>(&self, mut state: &mut H) {
        DecimalF32(self.depth).hash(&mut state);
        self.stencil.hash(&mut state);
    }
}

/// How the backend constructed a resource. Chosen once per device from its
/// capability profile; both paths must produce identical results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CreationStrategy {
    /// The object was built through the ambient bind point, with the
    /// previous binding saved and restored around construction.
    Bind,
    /// The object was addressed directly during construction without
    /// touching the ambient bind state.
    Direct,
}

/// Counters accumulated by command-buffer replay, readable through
/// `DeviceContext::frame_statistics`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStatistics {
    pub submissions: u64,
    /// Pipeline bind records replayed, redundant ones included.
    pub pipeline_binds: u64,
    /// Pipeline bind records skipped because the pipeline was already
    /// active.
    pub redundant_pipeline_binds: u64,
    /// Times the full fixed-function state was actually applied.
    pub pipeline_state_applications: u64,
    pub draw_calls: u64,
    pub dispatches: u64,
    pub clears: u64,
}
