pub(crate) mod software;

pub(crate) type BackendApi = software::SoftwareApi;
pub(crate) type BackendDeviceContext = software::SoftwareDeviceContext;
pub(crate) type BackendBuffer = software::SoftwareBuffer;
pub(crate) type BackendTexture = software::SoftwareTexture;
pub(crate) type BackendSampler = software::SoftwareSampler;
pub(crate) type BackendVertexArray = software::SoftwareVertexArray;
pub(crate) type BackendShaderModule = software::SoftwareShaderModule;
pub(crate) type BackendProgram = software::SoftwareProgram;
pub(crate) type BackendRootSignature = software::SoftwareRootSignature;
pub(crate) type BackendPipeline = software::SoftwarePipeline;
pub(crate) type BackendQueryPool = software::SoftwareQueryPool;
pub(crate) type BackendSwapchain = software::SoftwareSwapchain;
