/// WF3D Web - browser handle for flying a wireframe box
///
/// The page owns the canvas and the drawing; this crate owns the box. Key
/// names from DOM keyboard events go in, projected node positions and the
/// edge list come out for the page to draw each frame.
use nalgebra::Point3;
use wasm_bindgen::prelude::*;
use wf3d_core::{parse_bindings, Key, KeyMap, Projection, RigidBox, DEFAULT_DEPTH};

/// Side length of the cube a new viewer starts with.
pub const DEFAULT_SIDE: f64 = 100.0;

/// Translate a DOM `KeyboardEvent.key` value.
pub fn translate_key(name: &str) -> Option<Key> {
    match name {
        "ArrowUp" => Some(Key::Up),
        "ArrowDown" => Some(Key::Down),
        "ArrowLeft" => Some(Key::Left),
        "ArrowRight" => Some(Key::Right),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
    }
}

fn to_js(err: wf3d_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebViewer {
    body: RigidBox,
    keymap: KeyMap,
    projection: Projection,
}

impl WebViewer {
    /// Build a viewer with the default cube centered on a viewport.
    pub fn with_viewport(width: f64, height: f64) -> wf3d_core::Result<Self> {
        let center = Point3::new(width / 2.0, height / 2.0, 0.0);
        Ok(Self {
            body: RigidBox::cube(center, DEFAULT_SIDE)?,
            keymap: KeyMap::default(),
            projection: Projection::centered(width, height, DEFAULT_DEPTH)?,
        })
    }

    /// Dispatch a key name; `Ok(false)` when nothing is bound to it.
    pub fn dispatch_key(&mut self, name: &str) -> wf3d_core::Result<bool> {
        let Some(key) = translate_key(name) else {
            return Ok(false);
        };
        Ok(self.keymap.dispatch(key, &mut self.body)?.is_some())
    }

    pub fn body(&self) -> &RigidBox {
        &self.body
    }
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<WebViewer, JsValue> {
        Self::with_viewport(width, height).map_err(to_js)
    }

    /// Handle a key press. Rejected commands are reported on the console
    /// and returned as errors; the box does not move.
    pub fn press(&mut self, key: &str) -> Result<bool, JsValue> {
        self.dispatch_key(key).map_err(|err| {
            let message = to_js(err);
            web_sys::console::warn_1(&message);
            message
        })
    }

    /// Merge a key binding file over the current keys.
    pub fn load_bindings(&mut self, text: &str) -> Result<(), JsValue> {
        let overrides = parse_bindings(text).map_err(to_js)?;
        self.keymap.merge(overrides);
        Ok(())
    }

    /// Projected positions as `[x0, y0, x1, y1, ...]`.
    pub fn node_coordinates(&self) -> Vec<f64> {
        self.projection
            .frame(self.body.wireframe())
            .points()
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Edge endpoints as `[a0, b0, a1, b1, ...]`.
    pub fn edge_indices(&self) -> Vec<u32> {
        self.body
            .wireframe()
            .edges()
            .iter()
            .flat_map(|edge| [edge.a as u32, edge.b as u32])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_key() {
        assert_eq!(translate_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(translate_key("x"), Some(Key::Char('x')));
        assert_eq!(translate_key("Shift"), None);
        assert_eq!(translate_key(""), None);
    }

    #[test]
    fn test_render_feed() {
        let viewer = WebViewer::with_viewport(1000.0, 800.0).unwrap();

        let coordinates = viewer.node_coordinates();
        assert_eq!(coordinates.len(), 16);
        assert!((coordinates[0] - 447.5).abs() < 1e-9);
        assert!((coordinates[1] - 347.5).abs() < 1e-9);

        let edges = viewer.edge_indices();
        assert_eq!(edges.len(), 24);
        assert_eq!(&edges[..2], &[0, 4]);
    }

    #[test]
    fn test_dispatch_key() {
        let mut viewer = WebViewer::with_viewport(1000.0, 800.0).unwrap();

        assert!(!viewer.dispatch_key("p").unwrap());
        assert!(viewer.dispatch_key("Z").unwrap());
        assert!(viewer.dispatch_key("z").unwrap());
        assert!(!viewer.dispatch_key("Enter").unwrap());
        assert!(viewer.dispatch_key("ArrowUp").unwrap());
        assert_eq!(
            viewer.body().wireframe().position(0),
            Some(Point3::new(460.0, 350.0, -50.0))
        );
    }
}
