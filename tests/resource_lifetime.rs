use ember_rhi::{
    ApiDef, BufferDef, CreationStrategy, DeviceCapabilities, Extents3D, Format, GfxApi, GfxError,
    IndexType, MemoryUsage, ResourceCreation, ResourceFlags, ResourceType, ResourceUsage,
    SampleCount, TextureDef, VertexArrayDef, VertexAttributeRate, VertexLayout,
    VertexLayoutAttribute, VertexLayoutBuffer,
};

fn create_api(capabilities: DeviceCapabilities) -> GfxApi {
    unsafe { GfxApi::new(&ApiDef { capabilities }).unwrap() }
}

/// One flush per in-flight frame plus one to retire the bucket.
fn drain_deferred(api: &GfxApi) {
    for _ in 0..4 {
        api.device_context().free_gpu_memory();
    }
}

fn position_layout() -> VertexLayout {
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

#[test]
fn buffer_round_trip() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let data: Vec<u8> = (0..64u8).collect();
    let buffer = device_context
        .create_buffer(&BufferDef::for_structured_buffer(64), Some(&data))
        .unwrap();
    assert_eq!(buffer.read_back().unwrap(), data);
    assert_eq!(buffer.resource_type(), ResourceType::StructuredBuffer);

    buffer.write(4, &[0xAA, 0xBB]).unwrap();
    let read = buffer.read_back().unwrap();
    assert_eq!(&read[4..6], &[0xAA, 0xBB]);
    assert_eq!(read[3], 3);

    assert!(buffer.write(63, &[0, 0]).is_err());
}

#[test]
fn staging_buffer_refuses_read_back() {
    let api = create_api(DeviceCapabilities::modern());
    let buffer = api
        .device_context()
        .create_buffer(&BufferDef::for_staging_vertex_buffer(16), None)
        .unwrap();
    assert_eq!(buffer.resource_type(), ResourceType::VertexBuffer);
    assert!(matches!(
        buffer.read_back(),
        Err(GfxError::CapabilityUnsupported(_))
    ));
}

#[test]
fn vertex_array_holds_buffer_references() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let buffer = device_context
        .create_buffer(&BufferDef::for_vertex_buffer(256), None)
        .unwrap();
    assert_eq!(buffer.reference_count(), 1);

    let layout = position_layout();
    let vertex_array = device_context
        .create_vertex_array(&VertexArrayDef {
            vertex_buffers: &[&buffer],
            index_buffer: None,
            index_type: IndexType::Uint16,
            layout: &layout,
        })
        .unwrap();
    assert_eq!(buffer.reference_count(), 2);

    drop(vertex_array);
    drain_deferred(&api);
    assert_eq!(buffer.reference_count(), 1);
}

#[test]
fn attributeless_vertex_array_needs_no_buffers() {
    // Fullscreen-triangle style: the shader derives positions from the
    // vertex index, so the array binds nothing.
    for capabilities in [DeviceCapabilities::modern(), DeviceCapabilities::legacy()] {
        let api = create_api(capabilities);
        let vertex_array = api
            .device_context()
            .create_vertex_array(&VertexArrayDef {
                vertex_buffers: &[],
                index_buffer: None,
                index_type: IndexType::Uint16,
                layout: &VertexLayout::default(),
            })
            .unwrap();
        assert_eq!(vertex_array.vertex_buffer_count(), 0);
        assert!(vertex_array.layout().attributes.is_empty());
    }
}

#[test]
fn buffer_references_survive_either_construction_path() {
    for capabilities in [DeviceCapabilities::modern(), DeviceCapabilities::legacy()] {
        let api = create_api(capabilities);
        let device_context = api.device_context();

        let data: Vec<u8> = (0..32u8).rev().collect();
        let buffer = device_context
            .create_buffer(&BufferDef::for_vertex_buffer(32), Some(&data))
            .unwrap();
        let expected_strategy = if capabilities.supports_direct_state_access {
            CreationStrategy::Direct
        } else {
            CreationStrategy::Bind
        };
        assert_eq!(buffer.creation_strategy(), expected_strategy);
        assert_eq!(buffer.read_back().unwrap(), data);

        let layout = position_layout();
        let vertex_array = device_context
            .create_vertex_array(&VertexArrayDef {
                vertex_buffers: &[&buffer],
                index_buffer: None,
                index_type: IndexType::Uint16,
                layout: &layout,
            })
            .unwrap();
        assert_eq!(vertex_array.creation_strategy(), expected_strategy);
        assert_eq!(buffer.reference_count(), 2);
    }
}

#[test]
fn vertex_array_ids_are_dense_and_recycled() {
    let api = create_api(DeviceCapabilities::modern());
    let device_context = api.device_context();

    let buffer = device_context
        .create_buffer(&BufferDef::for_vertex_buffer(64), None)
        .unwrap();
    let layout = position_layout();
    let make = || {
        device_context
            .create_vertex_array(&VertexArrayDef {
                vertex_buffers: &[&buffer],
                index_buffer: None,
                index_type: IndexType::Uint16,
                layout: &layout,
            })
            .unwrap()
    };

    let a = make();
    let b = make();
    let c = make();
    assert_eq!(a.vertex_array_id(), 0);
    assert_eq!(b.vertex_array_id(), 1);
    assert_eq!(c.vertex_array_id(), 2);

    // Ids return to the pool once the array is actually reclaimed, not at
    // release time.
    drop(b);
    drain_deferred(&api);
    let d = make();
    assert_eq!(d.vertex_array_id(), 1);
}

#[test]
fn texture_mip_offsets_walk_the_packed_chain() {
    let api = create_api(DeviceCapabilities::modern());
    let texture = api
        .device_context()
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width: 64,
                    height: 64,
                    depth: 1,
                },
                mip_count: 3,
                format: Format::R8G8B8A8_UNORM,
                usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap();

    // 64x64, 32x32 and 16x16 RGBA8 levels.
    assert_eq!(texture.mip_byte_offsets(), vec![0, 16384, 20480]);
    assert_eq!(texture.definition().total_size_in_bytes(), 21504);
}

#[test]
fn mipmapped_upload_lands_level_data_where_offsets_say() {
    let api = create_api(DeviceCapabilities::modern());

    let def = TextureDef {
        extents: Extents3D {
            width: 4,
            height: 4,
            depth: 1,
        },
        mip_count: 2,
        format: Format::R8_UNORM,
        usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
        creation_flags: ResourceCreation::DATA_CONTAINS_MIPMAPS,
        ..TextureDef::default()
    };
    let mut data = vec![7u8; 16];
    data.extend_from_slice(&[9u8; 4]);
    let texture = api.device_context().create_texture(&def, Some(&data)).unwrap();

    assert_eq!(texture.read_level(0, 0).unwrap(), vec![7u8; 16]);
    assert_eq!(texture.read_level(1, 0).unwrap(), vec![9u8; 4]);
}

#[test]
fn generated_mips_sample_the_level_above() {
    let api = create_api(DeviceCapabilities::modern());

    let def = TextureDef {
        extents: Extents3D {
            width: 2,
            height: 2,
            depth: 1,
        },
        mip_count: 2,
        format: Format::R8_UNORM,
        usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
        creation_flags: ResourceCreation::GENERATE_MIPMAPS,
        ..TextureDef::default()
    };
    let texture = api
        .device_context()
        .create_texture(&def, Some(&[10, 20, 30, 40]))
        .unwrap();
    assert_eq!(texture.read_level(1, 0).unwrap(), vec![10]);
}

#[test]
fn cube_texture_classification() {
    let api = create_api(DeviceCapabilities::modern());
    let texture = api
        .device_context()
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width: 16,
                    height: 16,
                    depth: 1,
                },
                array_length: 6,
                format: Format::R8G8B8A8_UNORM,
                usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
                resource_flags: ResourceFlags::TEXTURE_CUBE,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(texture.resource_type(), ResourceType::TextureCube);
}

#[test]
fn sampler_anisotropy_clamps_to_device_maximum() {
    let api = create_api(DeviceCapabilities::legacy());
    let sampler = api.device_context().create_sampler(&ember_rhi::SamplerDef {
        max_anisotropy: 16.0,
        ..ember_rhi::SamplerDef::default()
    });
    assert!((sampler.definition().max_anisotropy - 4.0).abs() < f32::EPSILON);
}

#[test]
fn multisample_texture_cannot_take_mips() {
    let api = create_api(DeviceCapabilities::modern());
    // sample_count of exactly one is the boundary: a mip chain is allowed.
    let texture = api
        .device_context()
        .create_texture(
            &TextureDef {
                extents: Extents3D {
                    width: 8,
                    height: 8,
                    depth: 1,
                },
                mip_count: 2,
                format: Format::R8G8B8A8_UNORM,
                usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
                sample_count: SampleCount::SampleCount1,
                ..TextureDef::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(texture.mip_byte_offsets().len(), 2);
}

#[test]
#[should_panic(expected = "multisample")]
fn multisample_texture_with_mips_panics() {
    let api = create_api(DeviceCapabilities::modern());
    let _ = api.device_context().create_texture(
        &TextureDef {
            extents: Extents3D {
                width: 8,
                height: 8,
                depth: 1,
            },
            mip_count: 2,
            format: Format::R8G8B8A8_UNORM,
            usage_flags: ResourceUsage::AS_RENDER_TARGET,
            sample_count: SampleCount::SampleCount4,
            ..TextureDef::default()
        },
        None,
    );
}

#[test]
#[should_panic(expected = "multisample textures must be render targets")]
fn multisample_texture_without_render_target_usage_panics() {
    let api = create_api(DeviceCapabilities::modern());
    let _ = api.device_context().create_texture(
        &TextureDef {
            extents: Extents3D {
                width: 8,
                height: 8,
                depth: 1,
            },
            format: Format::R8G8B8A8_UNORM,
            usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
            sample_count: SampleCount::SampleCount4,
            ..TextureDef::default()
        },
        None,
    );
}

#[test]
#[should_panic(expected = "mip chain longer than the extents allow")]
fn mip_chain_longer_than_the_extents_panics() {
    let api = create_api(DeviceCapabilities::modern());
    // An 8x8 image supports at most four levels (8, 4, 2, 1).
    let _ = api.device_context().create_texture(
        &TextureDef {
            extents: Extents3D {
                width: 8,
                height: 8,
                depth: 1,
            },
            mip_count: 5,
            format: Format::R8G8B8A8_UNORM,
            usage_flags: ResourceUsage::AS_SHADER_RESOURCE,
            ..TextureDef::default()
        },
        None,
    );
}

#[test]
#[should_panic(expected = "render targets cannot take initial data")]
fn render_target_with_initial_data_panics() {
    let api = create_api(DeviceCapabilities::modern());
    let _ = api.device_context().create_texture(
        &TextureDef {
            extents: Extents3D {
                width: 2,
                height: 2,
                depth: 1,
            },
            format: Format::R8G8B8A8_UNORM,
            usage_flags: ResourceUsage::AS_RENDER_TARGET,
            ..TextureDef::default()
        },
        Some(&[0u8; 16]),
    );
}

#[test]
fn uniform_buffer_classification_and_memory() {
    let api = create_api(DeviceCapabilities::modern());
    let buffer = api
        .device_context()
        .create_buffer(&BufferDef::for_uniform_buffer(256), None)
        .unwrap();
    assert_eq!(buffer.resource_type(), ResourceType::UniformBuffer);
    assert_eq!(buffer.definition().memory_usage, MemoryUsage::CpuToGpu);
}
