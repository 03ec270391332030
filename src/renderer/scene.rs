//! Scene building: session state in, display list out
//!
//! [`render`] never touches the session, so painting the same snapshot twice
//! yields the same frame.

use glam::Vec2;

use super::draw::{DrawCommand, Font, Frame, Stroke, colors};
use crate::config::GameConfig;
use crate::sim::{Aabb, Entity, Obstacle, Session};

/// Corner radius for obstacles and the entity
const CORNER_RADIUS: f32 = 5.0;
const OBSTACLE_OUTLINE: f32 = 4.0;
const ENTITY_OUTLINE: f32 = 3.0;

/// Eye marker, relative to the entity's top-left corner
const EYE_OFFSET: Vec2 = Vec2::new(25.0, 10.0);
const EYE_RADIUS: f32 = 3.0;

/// Decorative clouds: each one is a cluster of (centre, radius) circles
const CLOUDS: [[(Vec2, f32); 3]; 2] = [
    [
        (Vec2::new(100.0, 100.0), 30.0),
        (Vec2::new(130.0, 100.0), 40.0),
        (Vec2::new(160.0, 100.0), 30.0),
    ],
    [
        (Vec2::new(300.0, 150.0), 35.0),
        (Vec2::new(330.0, 150.0), 45.0),
        (Vec2::new(365.0, 150.0), 35.0),
    ],
];

pub const GAME_OVER_TITLE: &str = "Game Over!";
pub const RESTART_PROMPT: &str = "Click to restart";

/// Build the frame for a session
pub fn render(session: &Session, config: &GameConfig) -> Frame {
    let mut frame = Frame::default();
    let surface = Aabb::new(
        Vec2::ZERO,
        Vec2::new(config.surface_width, config.surface_height),
    );

    // Background
    frame.push(DrawCommand::FillRect {
        rect: surface,
        color: colors::SKY,
    });
    for cloud in CLOUDS {
        frame.push(DrawCommand::Circles {
            circles: cloud.to_vec(),
            color: colors::CLOUD,
        });
    }

    for obstacle in &session.obstacles {
        obstacle_shapes(&mut frame, obstacle, config.surface_height);
    }
    entity_shapes(&mut frame, &session.entity);

    if !session.is_running() {
        game_over_overlay(&mut frame, surface, session.score);
    }

    frame
}

fn obstacle_shapes(frame: &mut Frame, obstacle: &Obstacle, surface_height: f32) {
    let stroke = Some(Stroke {
        color: colors::OUTLINE,
        width: OBSTACLE_OUTLINE,
    });
    for rect in [
        obstacle.upper_segment(),
        obstacle.lower_segment(surface_height),
    ] {
        frame.push(DrawCommand::RoundRect {
            rect,
            radius: CORNER_RADIUS,
            fill: colors::OBSTACLE,
            stroke,
        });
    }
}

fn entity_shapes(frame: &mut Frame, entity: &Entity) {
    frame.push(DrawCommand::RoundRect {
        rect: entity.bounds(),
        radius: CORNER_RADIUS,
        fill: colors::ENTITY,
        stroke: Some(Stroke {
            color: colors::OUTLINE,
            width: ENTITY_OUTLINE,
        }),
    });
    frame.push(DrawCommand::Circle {
        center: entity.pos + EYE_OFFSET,
        radius: EYE_RADIUS,
        color: colors::EYE,
    });
}

fn game_over_overlay(frame: &mut Frame, surface: Aabb, score: u32) {
    frame.push(DrawCommand::FillRect {
        rect: surface,
        color: colors::OVERLAY,
    });

    let centre = surface.size() * 0.5;
    let lines = [
        (GAME_OVER_TITLE.to_string(), -20.0, Font { size: 40.0, bold: true }),
        (format!("Score: {score}"), 20.0, Font { size: 24.0, bold: true }),
        (RESTART_PROMPT.to_string(), 60.0, Font { size: 18.0, bold: false }),
    ];
    for (text, dy, font) in lines {
        frame.push(DrawCommand::Text {
            text,
            pos: Vec2::new(centre.x, centre.y + dy),
            font,
            color: colors::OVERLAY_TEXT,
        });
    }
}
