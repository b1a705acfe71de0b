use crate::backends::software::device::RenderTargetBinding;
use crate::backends::software::texture::encode_clear_color;
use crate::{
    ClearFlags, ColorClearValue, Command, CommandBuffer, DepthStencilClearValue, DeviceContext,
    Format, FrameStatistics, Framebuffer, PipelineType, QueryType, Texture,
};

fn encode_depth_stencil(format: Format, value: &DepthStencilClearValue, flags: ClearFlags) -> Option<Vec<u8>> {
    match format {
        Format::D32_SFLOAT => Some(value.depth.to_le_bytes().to_vec()),
        Format::D24_UNORM_S8_UINT => {
            let depth_bits = (f64::from(value.depth.clamp(0.0, 1.0)) * f64::from((1u32 << 24) - 1))
                as u32;
            let stencil = if flags.contains(ClearFlags::STENCIL) {
                value.stencil & 0xFF
            } else {
                0
            };
            Some(((stencil << 24) | depth_bits).to_le_bytes().to_vec())
        }
        _ => None,
    }
}

fn clear_framebuffer(
    framebuffer: &Framebuffer,
    flags: ClearFlags,
    color: &ColorClearValue,
    depth_stencil: &DepthStencilClearValue,
) {
    let extents = framebuffer.extents();
    if flags.contains(ClearFlags::COLOR) {
        for attachment in &framebuffer.inner.color_attachments {
            let def = attachment.texture.definition();
            let texel = match encode_clear_color(def.format, color) {
                Some(texel) => texel,
                None => {
                    log::warn!("clear color not encodable as {:?}", def.format);
                    continue;
                }
            };
            let slices = match attachment.array_slice {
                Some(slice) => slice..slice + 1,
                None => 0..def.array_length,
            };
            for slice in slices {
                attachment.texture.inner.backend_texture.fill_region(
                    def,
                    attachment.mip_level,
                    slice,
                    extents.width,
                    extents.height,
                    &texel,
                );
            }
        }
    }
    if flags.intersects(ClearFlags::DEPTH | ClearFlags::STENCIL) {
        if let Some(attachment) = &framebuffer.inner.depth_stencil_attachment {
            let def = attachment.texture.definition();
            if let Some(texel) = encode_depth_stencil(def.format, depth_stencil, flags) {
                attachment.texture.inner.backend_texture.fill_region(
                    def,
                    attachment.mip_level,
                    attachment.array_slice.unwrap_or(0),
                    extents.width,
                    extents.height,
                    &texel,
                );
            }
        }
    }
}

fn clear_default_target(texture: &Texture, color: &ColorClearValue) {
    let def = texture.definition();
    if let Some(texel) = encode_clear_color(def.format, color) {
        texture.inner.backend_texture.fill_region(
            def,
            0,
            0,
            def.extents.width,
            def.extents.height,
            &texel,
        );
    }
}

impl DeviceContext {
    pub fn frame_statistics(&self) -> FrameStatistics {
        *self
            .inner
            .backend_device_context
            .statistics
            .lock()
            .unwrap()
    }

    pub fn reset_frame_statistics(&self) {
        *self
            .inner
            .backend_device_context
            .statistics
            .lock()
            .unwrap() = FrameStatistics::default();
    }

    pub(crate) fn backend_submit_command_buffer(&self, command_buffer: &CommandBuffer) {
        let device = &self.inner.backend_device_context;
        let mut replay = device.replay.lock().unwrap();
        let mut stats = device.statistics.lock().unwrap();

        for command in command_buffer.commands() {
            match command {
                Command::SetRenderTarget { framebuffer } => {
                    replay.render_target = Some(match framebuffer {
                        Some(framebuffer) => RenderTargetBinding::Framebuffer(framebuffer.clone()),
                        None => RenderTargetBinding::Default,
                    });
                }
                Command::SetViewportAndScissor {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => {
                    replay.viewport = Some((*x, *y, *width, *height));
                }
                Command::Clear {
                    flags,
                    color,
                    depth_stencil,
                } => {
                    match replay
                        .render_target
                        .clone()
                        .unwrap_or(RenderTargetBinding::Default)
                    {
                        RenderTargetBinding::Framebuffer(framebuffer) => {
                            if !framebuffer.is_complete() {
                                log::error!("clear into an incomplete framebuffer dropped");
                                continue;
                            }
                            clear_framebuffer(&framebuffer, *flags, color, depth_stencil);
                        }
                        RenderTargetBinding::Default => match device.default_render_target() {
                            Some(backbuffer) => {
                                if flags.contains(ClearFlags::COLOR) {
                                    clear_default_target(&backbuffer, color);
                                }
                            }
                            None => {
                                log::error!("clear with no render target dropped");
                                continue;
                            }
                        },
                    }
                    stats.clears += 1;
                }
                Command::SetRootSignature { root_signature } => {
                    replay.root_signature = Some(root_signature.clone());
                }
                Command::SetPipelineState { pipeline } => {
                    stats.pipeline_binds += 1;
                    let id = pipeline.pipeline_id();
                    if replay.applied_pipeline_id == Some(id) {
                        stats.redundant_pipeline_binds += 1;
                    } else {
                        // Full fixed-function application: program first,
                        // then rasterizer, depth and blend blocks.
                        stats.pipeline_state_applications += 1;
                        replay.applied_pipeline_id = Some(id);
                    }
                    replay.pipeline = Some(pipeline.clone());
                }
                Command::SetVertexArray { vertex_array } => {
                    replay.vertex_array = Some(vertex_array.clone());
                }
                Command::SetResourceGroup { resource_group } => {
                    replay
                        .resource_groups
                        .insert(resource_group.parameter_index(), resource_group.clone());
                }
                Command::Draw { .. } | Command::DrawInstanced { .. } | Command::DrawIndexed { .. } => {
                    let pipeline = match &replay.pipeline {
                        Some(p) if p.pipeline_type() == PipelineType::Graphics => p,
                        Some(_) => {
                            log::error!("draw with a compute pipeline bound dropped");
                            continue;
                        }
                        None => {
                            log::error!("draw with no pipeline bound dropped");
                            continue;
                        }
                    };
                    if !pipeline.program().link_succeeded() {
                        log::error!("draw with an unlinked program dropped");
                        continue;
                    }
                    let vertex_array = match &replay.vertex_array {
                        Some(va) => va,
                        None => {
                            log::error!("draw with no vertex array bound dropped");
                            continue;
                        }
                    };
                    if matches!(command, Command::DrawIndexed { .. })
                        && vertex_array.index_buffer().is_none()
                    {
                        log::error!("indexed draw without an index buffer dropped");
                        continue;
                    }
                    if let Some(RenderTargetBinding::Framebuffer(framebuffer)) =
                        &replay.render_target
                    {
                        if !framebuffer.is_complete() {
                            log::error!("draw into an incomplete framebuffer dropped");
                            continue;
                        }
                    }
                    stats.draw_calls += 1;
                }
                Command::Dispatch { .. } => {
                    match &replay.pipeline {
                        Some(p) if p.pipeline_type() == PipelineType::Compute => {}
                        _ => {
                            log::error!("dispatch without a compute pipeline bound dropped");
                            continue;
                        }
                    }
                    stats.dispatches += 1;
                }
                Command::BeginQuery { query_pool, index } => {
                    if query_pool.query_type() == QueryType::Timestamp {
                        log::error!("begin/end is not valid on timestamp queries");
                        continue;
                    }
                    if *index >= query_pool.definition().query_count {
                        log::error!("query index {} outside the pool dropped", index);
                        continue;
                    }
                    replay.query_starts.insert(
                        (query_pool.inner.backend_query_pool.handle(), *index),
                        (stats.draw_calls, stats.dispatches),
                    );
                }
                Command::EndQuery { query_pool, index } => {
                    if *index >= query_pool.definition().query_count {
                        log::error!("query index {} outside the pool dropped", index);
                        continue;
                    }
                    let key = (query_pool.inner.backend_query_pool.handle(), *index);
                    match replay.query_starts.remove(&key) {
                        Some((draws_at_begin, dispatches_at_begin)) => {
                            // Saturate: a statistics reset between begin and
                            // end leaves the snapshot ahead of the counters.
                            let draws = stats.draw_calls.saturating_sub(draws_at_begin);
                            let value = match query_pool.query_type() {
                                QueryType::Occlusion => draws,
                                QueryType::PipelineStatistics => {
                                    let dispatches =
                                        stats.dispatches.saturating_sub(dispatches_at_begin);
                                    (dispatches << 32) | (draws & 0xffff_ffff)
                                }
                                QueryType::Timestamp => unreachable!(),
                            };
                            query_pool
                                .inner
                                .backend_query_pool
                                .write_value(*index, value);
                            replay.pending_queries.push((query_pool.clone(), *index));
                        }
                        None => log::error!("query {} ended without a begin", index),
                    }
                }
                Command::WriteTimestamp { query_pool, index } => {
                    if query_pool.query_type() != QueryType::Timestamp {
                        log::error!("timestamp write into a non-timestamp pool");
                        continue;
                    }
                    if *index >= query_pool.definition().query_count {
                        log::error!("query index {} outside the pool dropped", index);
                        continue;
                    }
                    query_pool
                        .inner
                        .backend_query_pool
                        .write_value(*index, device.next_timestamp());
                    replay.pending_queries.push((query_pool.clone(), *index));
                }
            }
        }

        // The submission retires here, so everything it queried becomes
        // observable.
        for (query_pool, index) in replay.pending_queries.drain(..) {
            query_pool.inner.backend_query_pool.complete(index);
        }
        stats.submissions += 1;
    }
}
