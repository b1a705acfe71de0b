use ember_rhi::{
    ApiDef, BlendState, BufferDef, ClearFlags, ColorClearValue, CommandBuffer, ComputePipelineDef,
    ComputeProgramDef, DepthState, DepthStencilClearValue, DescriptorRange, DescriptorRangeType,
    DeviceCapabilities, Extents3D, Format, FramebufferAttachmentDef, FramebufferDef, GfxApi,
    GraphicsPipelineDef, GraphicsProgramDef, IndexType, Pipeline, PipelineType,
    PresentSuccessResult, PrimitiveTopology, QueryPoolDef, QueryType, RasterizerState, RenderPass,
    RenderPassDef, ResourceGroupBinding, ResourceGroupDef, ResourceUsage, RootParameter,
    RootSignature, RootSignatureDef, SampleCount, SamplerDef, ShaderModuleDef, ShaderStageFlags,
    SwapchainDef, TextureDef, VertexArray, VertexArrayDef, VertexAttributeRate, VertexLayout,
    VertexLayoutAttribute, VertexLayoutBuffer,
};
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle, WebHandle};

fn create_api(capabilities: DeviceCapabilities) -> GfxApi {
    unsafe { GfxApi::new(&ApiDef { capabilities }).unwrap() }
}

struct TestWindow;

unsafe impl HasRawWindowHandle for TestWindow {
    fn raw_window_handle(&self) -> RawWindowHandle {
        RawWindowHandle::Web(WebHandle::empty())
    }
}

struct Scene {
    root_signature: RootSignature,
    render_pass: RenderPass,
    vertex_array: VertexArray,
    pipeline: Pipeline,
}

fn triangle_layout() -> VertexLayout {
    VertexLayout {
        attributes: vec![VertexLayoutAttribute {
            name: "position".to_owned(),
            format: Format::R32G32_SFLOAT,
            buffer_index: 0,
            byte_offset: 0,
        }],
        buffers: vec![VertexLayoutBuffer {
            stride: 8,
            rate: VertexAttributeRate::Vertex,
        }],
    }
}

fn build_scene(api: &GfxApi) -> Scene {
    let device_context = api.device_context();
    let root_signature = device_context
        .create_root_signature(&RootSignatureDef {
            parameters: vec![RootParameter::DescriptorTable(vec![DescriptorRange {
                name: "frame_constants".to_owned(),
                range_type: DescriptorRangeType::UniformBuffer,
                base_register: 0,
                count: 1,
                visibility: ShaderStageFlags::ALL_GRAPHICS,
            }])],
        })
        .unwrap();

    let layout = triangle_layout();
    let vs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::VERTEX,
            source: "void main() { gl_Position = vec4(position, 0.0, 1.0); }",
        })
        .unwrap();
    let fs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::FRAGMENT,
            source: "void main() { out_color = vec4(1.0); }",
        })
        .unwrap();
    let program = device_context
        .create_graphics_program(&GraphicsProgramDef {
            stages: &[&vs, &fs],
            root_signature: &root_signature,
            vertex_layout: &layout,
        })
        .unwrap();

    let vertex_buffer = device_context
        .create_buffer(&BufferDef::for_vertex_buffer(72), None)
        .unwrap();
    let index_buffer = device_context
        .create_buffer(&BufferDef::for_index_buffer(6), None)
        .unwrap();
    let vertex_array = device_context
        .create_vertex_array(&VertexArrayDef {
            vertex_buffers: &[&vertex_buffer],
            index_buffer: Some(&index_buffer),
            index_type: IndexType::Uint16,
            layout: &layout,
        })
        .unwrap();

    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::B8G8R8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();

    let pipeline = device_context
        .create_graphics_pipeline(&GraphicsPipelineDef {
            program: &program,
            root_signature: &root_signature,
            vertex_layout: &layout,
            blend_state: &BlendState::default_alpha_disabled(),
            depth_state: &DepthState::default(),
            rasterizer_state: &RasterizerState::default(),
            primitive_topology: PrimitiveTopology::TriangleList,
            render_pass: &render_pass,
        })
        .unwrap();

    Scene {
        root_signature,
        render_pass,
        vertex_array,
        pipeline,
    }
}

#[test]
fn redundant_pipeline_binds_are_skipped() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    device_context.submit_command_buffer(&command_buffer);

    let stats = device_context.frame_statistics();
    assert_eq!(stats.pipeline_binds, 3);
    assert_eq!(stats.redundant_pipeline_binds, 2);
    assert_eq!(stats.pipeline_state_applications, 1);

    // State survives submissions; a rebind next frame is still redundant.
    device_context.submit_command_buffer(&command_buffer);
    let stats = device_context.frame_statistics();
    assert_eq!(stats.pipeline_state_applications, 1);
    assert_eq!(stats.submissions, 2);
}

#[test]
fn draws_require_a_pipeline_and_vertex_array() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    // No pipeline bound yet, so the draw is dropped.
    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_draw(3, 0);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(device_context.frame_statistics().draw_calls, 0);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_root_signature(&scene.root_signature);
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_draw(3, 0);
    command_buffer.cmd_draw_indexed(3, 0, 0);
    command_buffer.cmd_draw_instanced(3, 0, 8, 0);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(device_context.frame_statistics().draw_calls, 3);
}

#[test]
fn command_buffer_replays_without_being_consumed() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_draw(3, 0);
    assert_eq!(command_buffer.len(), 3);

    device_context.submit_command_buffer(&command_buffer);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(command_buffer.len(), 3);
    assert_eq!(device_context.frame_statistics().draw_calls, 2);

    command_buffer.clear();
    assert!(command_buffer.is_empty());
}

#[test]
fn occlusion_queries_count_draws_and_complete_on_retire() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    let query_pool = device_context
        .create_query_pool(&QueryPoolDef {
            query_type: QueryType::Occlusion,
            query_count: 2,
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_begin_query(&query_pool, 0);
    command_buffer.cmd_draw(3, 0);
    command_buffer.cmd_draw(3, 0);
    command_buffer.cmd_end_query(&query_pool, 0);

    // Nothing submitted yet: the poll must come back empty-handed.
    assert_eq!(query_pool.result(0, false), None);

    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(query_pool.result(0, false), Some(2));
    assert_eq!(query_pool.result(0, true), Some(2));
    // Slot 1 was never written.
    assert_eq!(query_pool.result(1, false), None);
}

#[test]
fn timestamps_are_monotonic() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let query_pool = device_context
        .create_query_pool(&QueryPoolDef {
            query_type: QueryType::Timestamp,
            query_count: 2,
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_write_timestamp(&query_pool, 0);
    command_buffer.cmd_write_timestamp(&query_pool, 1);
    device_context.submit_command_buffer(&command_buffer);

    let first = query_pool.result(0, false).unwrap();
    let second = query_pool.result(1, false).unwrap();
    assert!(second > first);
}

#[test]
fn statistics_reset_inside_a_query_scope_saturates_to_zero() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    let query_pool = device_context
        .create_query_pool(&QueryPoolDef {
            query_type: QueryType::Occlusion,
            query_count: 1,
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_draw(3, 0);
    command_buffer.cmd_begin_query(&query_pool, 0);
    device_context.submit_command_buffer(&command_buffer);

    // The begin snapshot is now ahead of the zeroed counters.
    device_context.reset_frame_statistics();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_end_query(&query_pool, 0);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(query_pool.result(0, false), Some(0));
}

#[test]
fn out_of_range_query_indices_are_dropped_not_fatal() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let occlusion_pool = device_context
        .create_query_pool(&QueryPoolDef {
            query_type: QueryType::Occlusion,
            query_count: 1,
        })
        .unwrap();
    let timestamp_pool = device_context
        .create_query_pool(&QueryPoolDef {
            query_type: QueryType::Timestamp,
            query_count: 1,
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_begin_query(&occlusion_pool, 3);
    command_buffer.cmd_end_query(&occlusion_pool, 3);
    command_buffer.cmd_write_timestamp(&timestamp_pool, 3);
    command_buffer.cmd_write_timestamp(&timestamp_pool, 0);
    device_context.submit_command_buffer(&command_buffer);

    // The in-range write still landed; the stray records were dropped.
    assert!(timestamp_pool.result(0, false).is_some());
    assert_eq!(occlusion_pool.result(0, false), None);
}

#[test]
fn pipeline_statistics_queries_pack_draws_and_dispatches() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    let root_signature = device_context
        .create_root_signature(&RootSignatureDef {
            parameters: vec![RootParameter::DescriptorTable(vec![DescriptorRange {
                name: "io".to_owned(),
                range_type: DescriptorRangeType::StructuredBuffer,
                base_register: 0,
                count: 1,
                visibility: ShaderStageFlags::COMPUTE,
            }])],
        })
        .unwrap();
    let cs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::COMPUTE,
            source: "void main() {}",
        })
        .unwrap();
    let program = device_context
        .create_compute_program(&ComputeProgramDef {
            compute_module: &cs,
            root_signature: &root_signature,
        })
        .unwrap();
    let compute_pipeline = device_context
        .create_compute_pipeline(&ComputePipelineDef {
            program: &program,
            root_signature: &root_signature,
        })
        .unwrap();

    let query_pool = device_context
        .create_query_pool(&QueryPoolDef {
            query_type: QueryType::PipelineStatistics,
            query_count: 1,
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_begin_query(&query_pool, 0);
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_draw(3, 0);
    command_buffer.cmd_draw(3, 0);
    command_buffer.cmd_set_pipeline_state(&compute_pipeline);
    command_buffer.cmd_dispatch(4, 4, 1);
    command_buffer.cmd_end_query(&query_pool, 0);
    device_context.submit_command_buffer(&command_buffer);

    let value = query_pool.result(0, false).unwrap();
    assert_eq!(value & 0xffff_ffff, 2);
    assert_eq!(value >> 32, 1);
}

#[test]
fn dispatch_needs_a_compute_pipeline() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let root_signature = device_context
        .create_root_signature(&RootSignatureDef {
            parameters: vec![RootParameter::DescriptorTable(vec![DescriptorRange {
                name: "io".to_owned(),
                range_type: DescriptorRangeType::StructuredBuffer,
                base_register: 0,
                count: 1,
                visibility: ShaderStageFlags::COMPUTE,
            }])],
        })
        .unwrap();
    let cs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::COMPUTE,
            source: "void main() {}",
        })
        .unwrap();
    let program = device_context
        .create_compute_program(&ComputeProgramDef {
            compute_module: &cs,
            root_signature: &root_signature,
        })
        .unwrap();
    let pipeline = device_context
        .create_compute_pipeline(&ComputePipelineDef {
            program: &program,
            root_signature: &root_signature,
        })
        .unwrap();
    assert_eq!(pipeline.pipeline_type(), PipelineType::Compute);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_dispatch(8, 8, 1);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(device_context.frame_statistics().dispatches, 0);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_pipeline_state(&pipeline);
    command_buffer.cmd_dispatch(8, 8, 1);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(device_context.frame_statistics().dispatches, 1);
}

#[test]
fn resource_groups_bind_against_their_parameter() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let scene = build_scene(&api);

    let uniform_buffer = device_context
        .create_buffer(&BufferDef::for_uniform_buffer(64), None)
        .unwrap();
    let resource_group = device_context
        .create_resource_group(&ResourceGroupDef {
            root_signature: &scene.root_signature,
            parameter_index: 0,
            bindings: &[ResourceGroupBinding::UniformBuffer(uniform_buffer.clone())],
        })
        .unwrap();
    assert_eq!(resource_group.parameter_index(), 0);
    assert_eq!(uniform_buffer.reference_count(), 2);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_root_signature(&scene.root_signature);
    command_buffer.cmd_set_resource_group(&resource_group);
    command_buffer.cmd_set_pipeline_state(&scene.pipeline);
    command_buffer.cmd_set_vertex_array(&scene.vertex_array);
    command_buffer.cmd_draw(3, 0);
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(device_context.frame_statistics().draw_calls, 1);
}

#[test]
#[should_panic(expected = "patch control point count exceeds device maximum")]
fn patch_list_above_device_maximum_panics() {
    let api = create_api(DeviceCapabilities::legacy());
    let device_context = api.device_context();
    let root_signature = device_context
        .create_root_signature(&RootSignatureDef {
            parameters: vec![RootParameter::DescriptorTable(vec![DescriptorRange {
                name: "patch_constants".to_owned(),
                range_type: DescriptorRangeType::UniformBuffer,
                base_register: 0,
                count: 1,
                visibility: ShaderStageFlags::ALL_GRAPHICS,
            }])],
        })
        .unwrap();
    let layout = triangle_layout();
    let vs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::VERTEX,
            source: "void main() {}",
        })
        .unwrap();
    let fs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::FRAGMENT,
            source: "void main() {}",
        })
        .unwrap();
    let program = device_context
        .create_graphics_program(&GraphicsProgramDef {
            stages: &[&vs, &fs],
            root_signature: &root_signature,
            vertex_layout: &layout,
        })
        .unwrap();
    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();

    // The legacy profile caps patches at 16 control points.
    let _ = device_context.create_graphics_pipeline(&GraphicsPipelineDef {
        program: &program,
        root_signature: &root_signature,
        vertex_layout: &layout,
        blend_state: &BlendState::default_alpha_disabled(),
        depth_state: &DepthState::default(),
        rasterizer_state: &RasterizerState::default(),
        primitive_topology: PrimitiveTopology::PatchList(20),
        render_pass: &render_pass,
    });
}

#[test]
fn swapchain_backbuffer_is_the_default_render_target() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let window = TestWindow;

    let mut swapchain = device_context
        .create_swapchain(
            &window,
            &SwapchainDef {
                width: 8,
                height: 8,
                vertical_sync_interval: 1,
            },
        )
        .unwrap();
    assert_eq!(swapchain.format(), Format::B8G8R8A8_UNORM);

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_render_target(None);
    command_buffer.cmd_clear(
        ClearFlags::COLOR,
        ColorClearValue([1.0, 0.0, 0.0, 1.0]),
        DepthStencilClearValue::default(),
    );
    device_context.submit_command_buffer(&command_buffer);

    // B8G8R8A8 packs red into the third byte.
    let pixels = swapchain.backbuffer().read_level(0, 0).unwrap();
    assert_eq!(&pixels[0..4], &[0, 0, 255, 255]);

    assert_eq!(swapchain.present().unwrap(), PresentSuccessResult::Success);
    assert_eq!(swapchain.frame_index(), 1);

    swapchain.resize(16, 4).unwrap();
    assert_eq!(swapchain.extents(), (16, 4));
    assert_eq!(swapchain.backbuffer().extents().width, 16);

    device_context.submit_command_buffer(&command_buffer);
    let pixels = swapchain.backbuffer().read_level(0, 0).unwrap();
    assert_eq!(&pixels[0..4], &[0, 0, 255, 255]);
}

#[test]
fn render_to_texture_then_composite_to_backbuffer() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();
    let window = TestWindow;

    let swapchain = device_context
        .create_swapchain(
            &window,
            &SwapchainDef {
                width: 8,
                height: 8,
                vertical_sync_interval: 1,
            },
        )
        .unwrap();

    let offscreen = device_context
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width: 16,
                    height: 16,
                    depth: 1,
                },
                format: Format::R8G8B8A8_UNORM,
                usage_flags: ResourceUsage::AS_RENDER_TARGET | ResourceUsage::AS_SHADER_RESOURCE,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap();
    let offscreen_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();
    let framebuffer = device_context
        .create_framebuffer(&FramebufferDef {
            render_pass: &offscreen_pass,
            color_attachments: &[FramebufferAttachmentDef {
                texture: &offscreen,
                mip_level: 0,
                array_slice: None,
            }],
            depth_stencil_attachment: None,
        })
        .unwrap();
    assert!(framebuffer.is_complete());

    // Composite pass samples the offscreen texture.
    let root_signature = device_context
        .create_root_signature(&RootSignatureDef {
            parameters: vec![RootParameter::DescriptorTable(vec![
                DescriptorRange {
                    name: "scene_color".to_owned(),
                    range_type: DescriptorRangeType::Texture,
                    base_register: 0,
                    count: 1,
                    visibility: ShaderStageFlags::FRAGMENT,
                },
                DescriptorRange {
                    name: "scene_sampler".to_owned(),
                    range_type: DescriptorRangeType::Sampler,
                    base_register: 0,
                    count: 1,
                    visibility: ShaderStageFlags::FRAGMENT,
                },
            ])],
        })
        .unwrap();
    let sampler = device_context.create_sampler(&SamplerDef::default());
    let resource_group = device_context
        .create_resource_group(&ResourceGroupDef {
            root_signature: &root_signature,
            parameter_index: 0,
            bindings: &[
                ResourceGroupBinding::Texture(offscreen.clone()),
                ResourceGroupBinding::Sampler(sampler),
            ],
        })
        .unwrap();

    let layout = triangle_layout();
    let vs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::VERTEX,
            source: "void main() { gl_Position = vec4(position, 0.0, 1.0); }",
        })
        .unwrap();
    let fs = device_context
        .create_shader_module(ShaderModuleDef::Source {
            stage: ShaderStageFlags::FRAGMENT,
            source: "void main() { out_color = texture(scene_color, uv); }",
        })
        .unwrap();
    let program = device_context
        .create_graphics_program(&GraphicsProgramDef {
            stages: &[&vs, &fs],
            root_signature: &root_signature,
            vertex_layout: &layout,
        })
        .unwrap();
    let backbuffer_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::B8G8R8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();
    let pipeline = device_context
        .create_graphics_pipeline(&GraphicsPipelineDef {
            program: &program,
            root_signature: &root_signature,
            vertex_layout: &layout,
            blend_state: &BlendState::default_alpha_disabled(),
            depth_state: &DepthState::default(),
            rasterizer_state: &RasterizerState::default(),
            primitive_topology: PrimitiveTopology::TriangleList,
            render_pass: &backbuffer_pass,
        })
        .unwrap();
    let vertex_buffer = device_context
        .create_buffer(&BufferDef::for_vertex_buffer(48), None)
        .unwrap();
    let vertex_array = device_context
        .create_vertex_array(&VertexArrayDef {
            vertex_buffers: &[&vertex_buffer],
            index_buffer: None,
            index_type: IndexType::Uint16,
            layout: &layout,
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_render_target(Some(&framebuffer));
    command_buffer.cmd_clear(
        ClearFlags::COLOR,
        ColorClearValue([0.0, 1.0, 0.0, 1.0]),
        DepthStencilClearValue::default(),
    );
    command_buffer.cmd_set_render_target(None);
    command_buffer.cmd_clear(
        ClearFlags::COLOR,
        ColorClearValue([0.2, 0.2, 0.2, 1.0]),
        DepthStencilClearValue::default(),
    );
    command_buffer.cmd_set_root_signature(&root_signature);
    command_buffer.cmd_set_resource_group(&resource_group);
    command_buffer.cmd_set_pipeline_state(&pipeline);
    command_buffer.cmd_set_vertex_array(&vertex_array);
    command_buffer.cmd_draw(6, 0);
    device_context.submit_command_buffer(&command_buffer);

    // The offscreen target kept the green clear through the second pass.
    let offscreen_pixels = offscreen.read_level(0, 0).unwrap();
    assert_eq!(&offscreen_pixels[0..4], &[0, 255, 0, 255]);
    let last = offscreen_pixels.len() - 4;
    assert_eq!(&offscreen_pixels[last..], &[0, 255, 0, 255]);

    // Backbuffer took the gray clear; B8G8R8A8 stores identical channels.
    let backbuffer_pixels = swapchain.backbuffer().read_level(0, 0).unwrap();
    assert_eq!(&backbuffer_pixels[0..4], &[51, 51, 51, 255]);

    let stats = device_context.frame_statistics();
    assert_eq!(stats.clears, 2);
    assert_eq!(stats.draw_calls, 1);
}
