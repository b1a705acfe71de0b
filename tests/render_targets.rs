use ember_rhi::{
    ApiDef, ClearFlags, ColorClearValue, CommandBuffer, DepthStencilClearValue,
    DeviceCapabilities, Extents3D, Format, FramebufferAttachmentDef, FramebufferCompleteness,
    FramebufferDef, GfxApi, GfxError, RenderPassDef, ResourceUsage, SampleCount, Texture,
    TextureDef,
};

fn create_api(capabilities: DeviceCapabilities) -> GfxApi {
    unsafe { GfxApi::new(&ApiDef { capabilities }).unwrap() }
}

fn render_target(api: &GfxApi, width: u32, height: u32, format: Format) -> Texture {
    api.device_context()
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width,
                    height,
                    depth: 1,
                },
                format,
                usage_flags: ResourceUsage::AS_RENDER_TARGET | ResourceUsage::AS_SHADER_RESOURCE,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap()
}

fn depth_target(api: &GfxApi, width: u32, height: u32) -> Texture {
    api.device_context()
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width,
                    height,
                    depth: 1,
                },
                format: Format::D32_SFLOAT,
                usage_flags: ResourceUsage::AS_DEPTH_STENCIL,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap()
}

fn whole(texture: &Texture) -> FramebufferAttachmentDef<'_> {
    FramebufferAttachmentDef {
        texture,
        mip_level: 0,
        array_slice: None,
    }
}

#[test]
fn framebuffer_extents_are_the_attachment_intersection() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let color = render_target(&api, 64, 64, Format::R8G8B8A8_UNORM);
    let depth = depth_target(&api, 32, 48);

    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: Some(Format::D32_SFLOAT),
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();

    let framebuffer = device_context
        .create_framebuffer(&FramebufferDef {
            render_pass: &render_pass,
            color_attachments: &[whole(&color)],
            depth_stencil_attachment: Some(whole(&depth)),
        })
        .unwrap();

    assert_eq!(framebuffer.width_and_height(), (32, 48));
    assert!(framebuffer.is_complete());
    assert!(!framebuffer.is_multisample_target());
}

#[test]
fn clear_respects_the_intersected_area() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let color = render_target(&api, 64, 64, Format::R8G8B8A8_UNORM);
    let depth = depth_target(&api, 32, 48);
    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: Some(Format::D32_SFLOAT),
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();
    let framebuffer = device_context
        .create_framebuffer(&FramebufferDef {
            render_pass: &render_pass,
            color_attachments: &[whole(&color)],
            depth_stencil_attachment: Some(whole(&depth)),
        })
        .unwrap();

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_render_target(Some(&framebuffer));
    command_buffer.cmd_clear(
        ClearFlags::COLOR | ClearFlags::DEPTH,
        ColorClearValue([1.0, 0.0, 0.0, 1.0]),
        DepthStencilClearValue {
            depth: 1.0,
            stencil: 0,
        },
    );
    device_context.submit_command_buffer(&command_buffer);

    let pixels = color.read_level(0, 0).unwrap();
    let texel = |x: usize, y: usize| &pixels[(y * 64 + x) * 4..(y * 64 + x) * 4 + 4];
    assert_eq!(texel(0, 0), &[255, 0, 0, 255]);
    assert_eq!(texel(31, 47), &[255, 0, 0, 255]);
    // Outside the intersection nothing was written.
    assert_eq!(texel(32, 0), &[0, 0, 0, 0]);
    assert_eq!(texel(0, 48), &[0, 0, 0, 0]);

    let depth_bytes = depth.read_level(0, 0).unwrap();
    assert_eq!(&depth_bytes[0..4], &1.0f32.to_le_bytes());
}

#[test]
fn multi_render_target_clear_writes_every_attachment() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let albedo = render_target(&api, 16, 16, Format::R8G8B8A8_UNORM);
    let normal = render_target(&api, 16, 16, Format::R8G8B8A8_UNORM);
    let velocity = render_target(&api, 16, 16, Format::R32G32_SFLOAT);

    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![
                Format::R8G8B8A8_UNORM,
                Format::R8G8B8A8_UNORM,
                Format::R32G32_SFLOAT,
            ],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();
    let framebuffer = device_context
        .create_framebuffer(&FramebufferDef {
            render_pass: &render_pass,
            color_attachments: &[whole(&albedo), whole(&normal), whole(&velocity)],
            depth_stencil_attachment: None,
        })
        .unwrap();
    assert!(framebuffer.is_complete());

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_render_target(Some(&framebuffer));
    command_buffer.cmd_clear(
        ClearFlags::COLOR,
        ColorClearValue([0.0, 1.0, 0.0, 1.0]),
        DepthStencilClearValue::default(),
    );
    device_context.submit_command_buffer(&command_buffer);

    assert_eq!(&albedo.read_level(0, 0).unwrap()[0..4], &[0, 255, 0, 255]);
    assert_eq!(&normal.read_level(0, 0).unwrap()[0..4], &[0, 255, 0, 255]);
    let velocity_bytes = velocity.read_level(0, 0).unwrap();
    assert_eq!(&velocity_bytes[0..4], &0.0f32.to_le_bytes());
    assert_eq!(&velocity_bytes[4..8], &1.0f32.to_le_bytes());
}

#[test]
fn attachment_count_above_device_limit_is_refused() {
    let api = create_api(DeviceCapabilities::legacy());
    let result = api.device_context().create_render_pass(&RenderPassDef {
        color_formats: vec![Format::R8G8B8A8_UNORM; 5],
        depth_stencil_format: None,
        sample_count: SampleCount::SampleCount1,
    });
    assert!(matches!(result, Err(GfxError::CapabilityUnsupported(_))));
}

#[test]
fn incomplete_framebuffer_is_reported_not_failed() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let color = render_target(&api, 8, 8, Format::R16G16B16A16_SFLOAT);
    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();
    let framebuffer = device_context
        .create_framebuffer(&FramebufferDef {
            render_pass: &render_pass,
            color_attachments: &[whole(&color)],
            depth_stencil_attachment: None,
        })
        .unwrap();

    assert!(!framebuffer.is_complete());
    assert!(framebuffer
        .incompleteness()
        .contains(&FramebufferCompleteness::FormatMismatch));

    // Rendering records aimed at it are dropped rather than applied.
    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_render_target(Some(&framebuffer));
    command_buffer.cmd_clear(
        ClearFlags::COLOR,
        ColorClearValue([1.0, 1.0, 1.0, 1.0]),
        DepthStencilClearValue::default(),
    );
    device_context.submit_command_buffer(&command_buffer);
    assert_eq!(device_context.frame_statistics().clears, 0);
    assert_eq!(&color.read_level(0, 0).unwrap()[0..2], &[0, 0]);
}

#[test]
fn render_to_mip_level_clears_only_that_level() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let texture = device_context
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width: 8,
                    height: 8,
                    depth: 1,
                },
                mip_count: 2,
                format: Format::R8G8B8A8_UNORM,
                usage_flags: ResourceUsage::AS_RENDER_TARGET
                    | ResourceUsage::AS_SHADER_RESOURCE,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap();
    let render_pass = device_context
        .create_render_pass(&RenderPassDef {
            color_formats: vec![Format::R8G8B8A8_UNORM],
            depth_stencil_format: None,
            sample_count: SampleCount::SampleCount1,
        })
        .unwrap();
    let framebuffer = device_context
        .create_framebuffer(&FramebufferDef {
            render_pass: &render_pass,
            color_attachments: &[FramebufferAttachmentDef {
                texture: &texture,
                mip_level: 1,
                array_slice: None,
            }],
            depth_stencil_attachment: None,
        })
        .unwrap();
    assert_eq!(framebuffer.width_and_height(), (4, 4));

    let mut command_buffer = CommandBuffer::new();
    command_buffer.cmd_set_render_target(Some(&framebuffer));
    command_buffer.cmd_clear(
        ClearFlags::COLOR,
        ColorClearValue([0.0, 0.0, 1.0, 1.0]),
        DepthStencilClearValue::default(),
    );
    device_context.submit_command_buffer(&command_buffer);

    assert_eq!(&texture.read_level(1, 0).unwrap()[0..4], &[0, 0, 255, 255]);
    assert_eq!(&texture.read_level(0, 0).unwrap()[0..4], &[0, 0, 0, 0]);
}
