use crate::{
    ClearFlags, ColorClearValue, DepthStencilClearValue, Framebuffer, Pipeline, QueryPool,
    ResourceGroup, RootSignature, VertexArray,
};

/// One recorded command. Records hold clones of the resources they
/// reference, so a spawned buffer keeps everything it needs alive until it
/// is cleared or dropped.
#[derive(Clone)]
pub enum Command {
    /// `None` targets the default backbuffer.
    SetRenderTarget {
        framebuffer: Option<Framebuffer>,
    },
    SetViewportAndScissor {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        min_depth: f32,
        max_depth: f32,
    },
    Clear {
        flags: ClearFlags,
        color: ColorClearValue,
        depth_stencil: DepthStencilClearValue,
    },
    SetRootSignature {
        root_signature: RootSignature,
    },
    SetPipelineState {
        pipeline: Pipeline,
    },
    SetVertexArray {
        vertex_array: VertexArray,
    },
    SetResourceGroup {
        resource_group: ResourceGroup,
    },
    Draw {
        vertex_count: u32,
        first_vertex: u32,
    },
    DrawInstanced {
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
        first_instance: u32,
    },
    DrawIndexed {
        index_count: u32,
        first_index: u32,
        vertex_offset: i32,
    },
    Dispatch {
        group_count_x: u32,
        group_count_y: u32,
        group_count_z: u32,
    },
    BeginQuery {
        query_pool: QueryPool,
        index: u32,
    },
    EndQuery {
        query_pool: QueryPool,
        index: u32,
    },
    WriteTimestamp {
        query_pool: QueryPool,
        index: u32,
    },
}

/// Append-only list of commands, recorded up front and replayed by
/// `DeviceContext::submit_command_buffer` in insertion order. Replay does
/// not consume the buffer; it can be submitted again or cleared and
/// refilled.
#[derive(Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Drops every record along with the resource references they hold.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn cmd_set_render_target(&mut self, framebuffer: Option<&Framebuffer>) {
        self.commands.push(Command::SetRenderTarget {
            framebuffer: framebuffer.cloned(),
        });
    }

    pub fn cmd_set_viewport_and_scissor(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.commands.push(Command::SetViewportAndScissor {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        });
    }

    pub fn cmd_clear(
        &mut self,
        flags: ClearFlags,
        color: ColorClearValue,
        depth_stencil: DepthStencilClearValue,
    ) {
        self.commands.push(Command::Clear {
            flags,
            color,
            depth_stencil,
        });
    }

    pub fn cmd_set_root_signature(&mut self, root_signature: &RootSignature) {
        self.commands.push(Command::SetRootSignature {
            root_signature: root_signature.clone(),
        });
    }

    pub fn cmd_set_pipeline_state(&mut self, pipeline: &Pipeline) {
        self.commands.push(Command::SetPipelineState {
            pipeline: pipeline.clone(),
        });
    }

    pub fn cmd_set_vertex_array(&mut self, vertex_array: &VertexArray) {
        self.commands.push(Command::SetVertexArray {
            vertex_array: vertex_array.clone(),
        });
    }

    pub fn cmd_set_resource_group(&mut self, resource_group: &ResourceGroup) {
        self.commands.push(Command::SetResourceGroup {
            resource_group: resource_group.clone(),
        });
    }

    pub fn cmd_draw(&mut self, vertex_count: u32, first_vertex: u32) {
        self.commands.push(Command::Draw {
            vertex_count,
            first_vertex,
        });
    }

    pub fn cmd_draw_instanced(
        &mut self,
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
        first_instance: u32,
    ) {
        self.commands.push(Command::DrawInstanced {
            vertex_count,
            first_vertex,
            instance_count,
            first_instance,
        });
    }

    pub fn cmd_draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) {
        self.commands.push(Command::DrawIndexed {
            index_count,
            first_index,
            vertex_offset,
        });
    }

    pub fn cmd_dispatch(&mut self, group_count_x: u32, group_count_y: u32, group_count_z: u32) {
        self.commands.push(Command::Dispatch {
            group_count_x,
            group_count_y,
            group_count_z,
        });
    }

    pub fn cmd_begin_query(&mut self, query_pool: &QueryPool, index: u32) {
        self.commands.push(Command::BeginQuery {
            query_pool: query_pool.clone(),
            index,
        });
    }

    pub fn cmd_end_query(&mut self, query_pool: &QueryPool, index: u32) {
        self.commands.push(Command::EndQuery {
            query_pool: query_pool.clone(),
            index,
        });
    }

    pub fn cmd_write_timestamp(&mut self, query_pool: &QueryPool, index: u32) {
        self.commands.push(Command::WriteTimestamp {
            query_pool: query_pool.clone(),
            index,
        });
    }
}
