use crate::{DeviceContext, LinkStrategy, ShaderModule, ShaderModuleDef};

/// Magic word the bytecode path expects at the head of a blob.
const BYTECODE_MAGIC: u32 = 0x0723_0203;

pub(crate) struct SoftwareShaderModule {
    handle: u32,
    compile_succeeded: bool,
    compile_log: String,
}

impl SoftwareShaderModule {
    pub fn new(device_context: &DeviceContext, def: &ShaderModuleDef<'_>) -> Self {
        let handle = device_context
            .inner
            .backend_device_context
            .allocate_handle();

        // The reference compiler accepts any non-empty source that does
        // not carry an `#error` directive, so tests can trigger both
        // outcomes deterministically.
        let (compile_succeeded, compile_log) = match def {
            ShaderModuleDef::Source { source, .. } => {
                if source.trim().is_empty() {
                    (false, "empty shader source".to_owned())
                } else if let Some(line) = source.lines().find(|l| l.trim_start().starts_with("#error")) {
                    (false, line.trim().to_owned())
                } else {
                    (true, String::new())
                }
            }
            ShaderModuleDef::Bytecode { bytecode, .. } => {
                if bytecode.len() >= 4
                    && u32::from_le_bytes([bytecode[0], bytecode[1], bytecode[2], bytecode[3]])
                        == BYTECODE_MAGIC
                {
                    (true, String::new())
                } else {
                    (false, "unrecognized bytecode header".to_owned())
                }
            }
        };

        Self {
            handle,
            compile_succeeded,
            compile_log,
        }
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn compile_succeeded(&self) -> bool {
        self.compile_succeeded
    }

    pub fn compile_log(&self) -> &str {
        &self.compile_log
    }

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}

pub(crate) struct SoftwareProgram {
    handle: u32,
    link_succeeded: bool,
    link_log: String,
}

impl SoftwareProgram {
    pub fn new(
        device_context: &DeviceContext,
        stages: &[ShaderModule],
        _link_strategy: LinkStrategy,
    ) -> Self {
        let handle = device_context
            .inner
            .backend_device_context
            .allocate_handle();

        let mut link_log = String::new();
        for stage in stages {
            if !stage.compile_succeeded() {
                if !link_log.is_empty() {
                    link_log.push('\n');
                }
                link_log.push_str(&format!(
                    "{:?} stage failed to compile: {}",
                    stage.stage(),
                    stage.compile_log()
                ));
            }
        }

        Self {
            handle,
            link_succeeded: link_log.is_empty(),
            link_log,
        }
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn link_succeeded(&self) -> bool {
        self.link_succeeded
    }

    pub fn link_log(&self) -> &str {
        &self.link_log
    }

    pub fn destroy(&self, _device_context: &DeviceContext) {}
}
