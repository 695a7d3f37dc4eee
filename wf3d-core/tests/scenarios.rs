use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Point2, Point3};
use wf3d_core::{
    parse_bindings, Command, Direction, Key, KeyMap, Projection, RigidBox, Spin, DEFAULT_DEPTH,
};

fn start_cube() -> RigidBox {
    RigidBox::cube(Point3::new(500.0, 400.0, 0.0), 100.0).unwrap()
}

#[test]
fn forward_moves_every_corner_by_the_same_vector() {
    let mut body = start_cube();
    assert_eq!(
        body.wireframe().position(0),
        Some(Point3::new(450.0, 350.0, -50.0))
    );

    let front = body
        .corners()
        .unwrap()
        .direction(Direction::Forward)
        .unwrap()
        .into_inner();
    let before: Vec<_> = body.wireframe().positions().collect();

    body.apply_command(Command::translate(Direction::Forward, 10.0))
        .unwrap();

    let after: Vec<_> = body.wireframe().positions().collect();
    assert_relative_eq!((after[0] - before[0]).norm(), 10.0, epsilon = 1e-12);
    for (p, q) in before.iter().zip(&after) {
        assert_relative_eq!(q - p, front * 10.0, epsilon = 1e-12);
    }
}

#[test]
fn yaw_and_back_restores_all_corners() {
    let mut body = start_cube();
    let before: Vec<_> = body.wireframe().positions().collect();

    body.apply_command(Command::rotate(Spin::Yaw, 0.1)).unwrap();
    body.apply_command(Command::rotate(Spin::Yaw, -0.1)).unwrap();

    for (p, q) in before.iter().zip(body.wireframe().positions()) {
        assert_abs_diff_eq!(*p, q, epsilon = 1e-9);
    }
}

#[test]
fn long_flight_keeps_the_box_rigid() {
    let mut body = start_cube();
    let keymap = KeyMap::default();
    let keys = [
        Key::Up,
        Key::Char('q'),
        Key::Left,
        Key::Char('x'),
        Key::Char('1'),
        Key::Char('s'),
        Key::Down,
        Key::Char('z'),
        Key::Right,
        Key::Char('w'),
        Key::Char('2'),
        Key::Char('a'),
    ];

    for _ in 0..200 {
        for key in keys {
            keymap.dispatch(key, &mut body).unwrap();
        }
    }

    let corners = body.corners().unwrap();
    corners.validate().unwrap();
    assert_relative_eq!(corners.front_edge().norm(), 100.0, epsilon = 1e-6);
    assert_relative_eq!(corners.right_edge().norm(), 100.0, epsilon = 1e-6);
    assert_relative_eq!(corners.top_edge().norm(), 100.0, epsilon = 1e-6);

    for direction in [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ] {
        let normal = corners.direction(direction).unwrap();
        assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn moves_follow_the_body_not_the_world() {
    let mut body = start_cube();
    // A quarter yaw turns the front face towards world +y.
    body.rotate(Spin::Yaw, std::f64::consts::FRAC_PI_2).unwrap();
    let center = body.corners().unwrap().center();

    body.translate(Direction::Forward, 10.0).unwrap();

    let moved = body.corners().unwrap().center() - center;
    assert_abs_diff_eq!(moved.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moved.y, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moved.z, 0.0, epsilon = 1e-9);
}

#[test]
fn custom_bindings_drive_the_same_body() {
    let mut keymap = KeyMap::default();
    keymap.merge(parse_bindings("up = forward 25\ne = roll 0.5\n").unwrap());

    let mut body = start_cube();
    keymap.dispatch(Key::Up, &mut body).unwrap();
    assert_relative_eq!(
        body.wireframe().position(0).unwrap(),
        Point3::new(475.0, 350.0, -50.0),
        epsilon = 1e-12
    );

    let ran = keymap.dispatch(Key::Char('e'), &mut body).unwrap();
    assert_eq!(ran, Some(Command::rotate(Spin::Roll, 0.5)));
}

#[test]
fn render_feed_tracks_the_body() {
    let mut body = start_cube();
    let projection = Projection::centered(1000.0, 800.0, DEFAULT_DEPTH).unwrap();

    let frame = projection.frame(body.wireframe());
    assert_eq!(frame.segments().count(), 12);
    assert_relative_eq!(frame.points()[0], Point2::new(447.5, 347.5));

    body.translate(Direction::Up, 50.0).unwrap();
    let frame = projection.frame(body.wireframe());
    // Corner 0 now sits on the neutral plane.
    assert_relative_eq!(frame.points()[0], Point2::new(450.0, 350.0), epsilon = 1e-12);
}
