// Host-side tests for the hero scene lifecycle, using a recording surface.

use app_core::*;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    CreatePoints(usize),
    CreateLines(usize),
    Update { handle: u8, vertices: usize },
    Render,
    Resize(u32, u32),
    Dispose,
}

#[derive(Default)]
struct RecordingSurface {
    calls: Rc<RefCell<Vec<Call>>>,
    fail_render: bool,
}

impl RenderSurface for RecordingSurface {
    type Handle = u8;

    fn create_point_cloud(&mut self, positions: &[Vec3], colors: &[Vec3]) -> u8 {
        assert_eq!(positions.len(), colors.len());
        self.calls.borrow_mut().push(Call::CreatePoints(positions.len()));
        0
    }

    fn create_line_set(&mut self, positions: &[Vec3], colors: &[Vec3]) -> u8 {
        assert_eq!(positions.len(), colors.len());
        self.calls.borrow_mut().push(Call::CreateLines(positions.len()));
        1
    }

    fn update_geometry(&mut self, handle: u8, positions: &[Vec3], colors: &[Vec3]) {
        assert_eq!(positions.len(), colors.len());
        self.calls.borrow_mut().push(Call::Update {
            handle,
            vertices: positions.len(),
        });
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(Call::Render);
        if self.fail_render {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.calls.borrow_mut().push(Call::Resize(width, height));
    }

    fn dispose(&mut self) {
        self.calls.borrow_mut().push(Call::Dispose);
    }
}

fn three_point_field() -> ParticleField {
    let c = Vec3::from_array(PRIMARY_BLUE);
    let config = FieldConfig {
        idle_amount: 0.0,
        ..FieldConfig::default()
    };
    ParticleField::from_points(
        config,
        vec![
            Point::new(Vec3::new(0.0, 4.0, 0.0), c),
            Point::new(Vec3::new(1.0, 4.0, 0.0), c),
            Point::new(Vec3::new(0.0, -4.0, 0.0), c),
        ],
    )
}

fn scene() -> (HeroScene<RecordingSurface>, Rc<RefCell<Vec<Call>>>) {
    let surface = RecordingSurface::default();
    let calls = surface.calls.clone();
    (HeroScene::new(surface, three_point_field()), calls)
}

#[test]
fn construction_creates_both_geometries() {
    let (scene, calls) = scene();
    assert_eq!(
        *calls.borrow(),
        vec![Call::CreatePoints(3), Call::CreateLines(2)]
    );
    assert_eq!(scene.links().links(), &[Link { a: 0, b: 1 }]);
    assert!(!scene.is_disposed());
}

#[test]
fn frame_updates_points_then_lines_then_renders() {
    let (mut scene, calls) = scene();
    calls.borrow_mut().clear();
    let mut cursor = CursorState::default();
    scene.frame(1.0 / 60.0, &mut cursor).unwrap();
    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Update { handle: 0, vertices: 3 },
            Call::Update { handle: 1, vertices: 2 },
            Call::Render,
        ]
    );
    assert!(scene.field().time() > 0.0);
}

#[test]
fn dispose_releases_the_surface_once() {
    let (mut scene, calls) = scene();
    scene.dispose();
    scene.dispose();
    assert!(scene.is_disposed());
    drop(scene);
    let disposals = calls.borrow().iter().filter(|c| **c == Call::Dispose).count();
    assert_eq!(disposals, 1);
}

#[test]
fn dropping_the_scene_disposes_it() {
    let (scene, calls) = scene();
    drop(scene);
    assert_eq!(calls.borrow().last(), Some(&Call::Dispose));
}

#[test]
fn disposed_scene_refuses_frames_and_resizes() {
    let (mut scene, calls) = scene();
    scene.dispose();
    calls.borrow_mut().clear();
    let mut cursor = CursorState::default();
    assert!(matches!(
        scene.frame(1.0 / 60.0, &mut cursor),
        Err(SceneError::Disposed)
    ));
    scene.resize(640, 480);
    assert!(calls.borrow().is_empty());
}

#[test]
fn resize_is_forwarded() {
    let (mut scene, calls) = scene();
    scene.resize(640, 480);
    assert_eq!(calls.borrow().last(), Some(&Call::Resize(640, 480)));
}

#[test]
fn render_failures_surface_as_scene_errors() {
    let surface = RecordingSurface {
        fail_render: true,
        ..RecordingSurface::default()
    };
    let mut scene = HeroScene::new(surface, three_point_field());
    let mut cursor = CursorState::default();
    let err = scene.frame(1.0 / 60.0, &mut cursor).unwrap_err();
    assert!(matches!(err, SceneError::Render(_)));
    assert_eq!(err.to_string(), "render failed: surface lost");
    // a failed frame does not tear the scene down
    assert!(!scene.is_disposed());
}
