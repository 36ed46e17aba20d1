use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::MountError;
use crate::shader::{self, SurfaceSize, UniformState, PLANE_SEGMENTS, PLANE_SIZE};

/// `requestAnimationFrame` loop that keeps rescheduling itself until stopped.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        // `f` holds the animation-frame closure so that it can keep calling
        // `request_animation_frame` on itself. Storing it inside an `Option`
        // lets us create the `Closure` first and then reach it from within.
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let (r, h) = (running.clone(), handle.clone());
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if !r.get() {
                return;
            }
            on_frame(now);

            // schedule next
            let Some(win) = window() else { return };
            if let Some(cb) = f.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => h.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = window()
            .ok_or("no window")?
            .request_animation_frame(g.borrow().as_ref().ok_or("frame closure missing")?.as_ref().unchecked_ref())?;
        handle.set(Some(id));

        Ok(Self { running, handle, closure: g })
    }

    /// Cancel the pending frame and break the closure's self-reference.
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(win)) = (self.handle.take(), window()) {
            let _ = win.cancel_animation_frame(id);
        }
        self.closure.borrow_mut().take();
    }
}

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, MountError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| MountError::Shader("cannot create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(MountError::Shader(info))
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, MountError> {
    let program = gl
        .create_program()
        .ok_or_else(|| MountError::Shader("cannot create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(MountError::Shader(info))
    }
}

/// Full-viewport shader background drawn into `<canvas id="ink">`.
pub struct InkBackground {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    shaders: [WebGlShader; 2],
    vao: WebGlVertexArrayObject,
    buffers: [WebGlBuffer; 2],
    index_count: i32,
    u_time: Option<WebGlUniformLocation>,
    u_mouse: Option<WebGlUniformLocation>,
    u_view_projection: Option<WebGlUniformLocation>,
    uniforms: UniformState,
    surface: SurfaceSize,
}

impl InkBackground {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(MountError::NoWebGl2)?
            .dyn_into()?;

        let vertex = compile(&gl, GL::VERTEX_SHADER, shader::VERTEX_SHADER)?;
        let fragment = compile(&gl, GL::FRAGMENT_SHADER, &shader::fragment_source())?;
        let program = link(&gl, &vertex, &fragment)?;

        let (vertices, indices) = shader::plane_mesh(PLANE_SIZE, PLANE_SEGMENTS);
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| MountError::Shader("cannot create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));

        let vbo = gl.create_buffer().ok_or_else(|| MountError::Shader("cannot create buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
        gl.buffer_data_with_array_buffer_view(
            GL::ARRAY_BUFFER,
            &js_sys::Float32Array::from(vertices.as_slice()),
            GL::STATIC_DRAW,
        );
        let stride = 5 * 4;
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(1, 2, GL::FLOAT, false, stride, 3 * 4);
        gl.enable_vertex_attrib_array(1);

        let ibo = gl.create_buffer().ok_or_else(|| MountError::Shader("cannot create buffer".into()))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&ibo));
        gl.buffer_data_with_array_buffer_view(
            GL::ELEMENT_ARRAY_BUFFER,
            &js_sys::Uint32Array::from(indices.as_slice()),
            GL::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);

        let u_time = gl.get_uniform_location(&program, "uTime");
        let u_mouse = gl.get_uniform_location(&program, "uMouse");
        let u_view_projection = gl.get_uniform_location(&program, "uViewProjection");

        let mut background = Self {
            canvas,
            gl,
            program,
            shaders: [vertex, fragment],
            vao,
            buffers: [vbo, ibo],
            index_count: indices.len() as i32,
            u_time,
            u_mouse,
            u_view_projection,
            uniforms: UniformState::default(),
            surface: SurfaceSize::from_viewport(1.0, 1.0, 1.0),
        };
        background.resize();
        log::info!("ink background ready ({} triangles)", background.index_count / 3);
        Ok(background)
    }

    /// Match the viewport. Accumulated time is kept.
    pub fn resize(&mut self) {
        let Some(win) = window() else { return };
        let (w, h) = super::dom::viewport(&win);
        self.surface = SurfaceSize::from_viewport(w, h, win.device_pixel_ratio());
        let (bw, bh) = self.surface.drawing_buffer();
        self.canvas.set_width(bw);
        self.canvas.set_height(bh);
        self.gl.viewport(0, 0, bw as i32, bh as i32);
    }

    pub fn pointer(&mut self, client_x: f64, client_y: f64) {
        self.uniforms
            .pointer_sample(client_x, client_y, self.surface.css_width, self.surface.css_height);
    }

    /// Draw one frame at page time `now` (ms).
    pub fn frame(&mut self, now: f64) {
        self.uniforms.frame_at(now);

        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.uniform1f(self.u_time.as_ref(), self.uniforms.time);
        gl.uniform2f(self.u_mouse.as_ref(), self.uniforms.mouse.x, self.uniforms.mouse.y);
        gl.uniform_matrix4fv_with_f32_array(
            self.u_view_projection.as_ref(),
            false,
            &self.surface.view_projection().to_cols_array(),
        );
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);
    }

    /// Release every GL object.
    pub fn release(&self) {
        let gl = &self.gl;
        gl.delete_vertex_array(Some(&self.vao));
        for buffer in &self.buffers {
            gl.delete_buffer(Some(buffer));
        }
        for shader in &self.shaders {
            gl.detach_shader(&self.program, shader);
            gl.delete_shader(Some(shader));
        }
        gl.delete_program(Some(&self.program));
        log::debug!("ink background released");
    }
}
