// raster.rs - Minimal software rasterizer for replay frames
//
// One pixel per scene unit. Sunset sky, near-black silhouettes.

use image::{Rgb, RgbImage};

use canyon_engine::sim::Weight;
use canyon_engine::world::{floor_y, rim_edge, x_left, x_right};
use canyon_engine::{RIM_Y, SCENE_H, SCENE_W, Session};

const SKY_TOP: [f32; 3] = [58.0, 27.0, 104.0];
const SKY_MID: [f32; 3] = [194.0, 74.0, 102.0];
const SKY_BOT: [f32; 3] = [255.0, 227.0, 161.0];
const FG: [f32; 3] = [11.0, 11.0, 16.0];
const PANEL: [f32; 3] = [255.0, 255.0, 255.0];

pub fn render(s: &Session) -> RgbImage {
    let (w, h) = (SCENE_W as u32, SCENE_H as u32);
    let mut img = RgbImage::new(w, h);

    sky(&mut img);
    canyon(&mut img);

    for r in s.ripples.iter() {
        let alpha = 0.22 * r.fade();
        for i in 0..16 {
            let a = i as f32 / 16.0 * std::f32::consts::TAU;
            let x = r.x + a.cos() * r.radius;
            let y = r.y + a.sin() * r.radius * 0.35;
            blend(&mut img, x as i32, y as i32, FG, alpha * 0.75);
        }
    }

    for d in s.drops.iter() {
        let sp = d.speed();
        let dw = ((d.r * (1.05 + sp * 0.22)) as i32).max(1);
        let dh = ((d.r * (1.10 + sp * 0.55)) as i32).max(1);
        let (x, y) = (d.x as i32 - dw / 2, d.y as i32 - dh / 2);
        fill(&mut img, x, y, dw, dh, FG, 0.88 * d.fade());
    }

    for p in s.splashes.iter() {
        let shade = match p.weight {
            Weight::Solid => 1.0,
            Weight::Faint => 0.75,
        };
        let size = (p.size as i32).max(1);
        fill(&mut img, p.x as i32, p.y as i32, size, size, FG, p.fade() * shade);
    }

    actor(&mut img, s);

    if s.phase().shows_overlay() {
        let (pw, ph) = (170, 78);
        let px = (SCENE_W as i32 - pw) / 2;
        let py = (SCENE_H * 0.18) as i32;
        fill(&mut img, px, py, pw, ph, PANEL, 0.08 * s.run.overlay);
    }

    let outro = s.outro_alpha();
    if outro > 0.0 {
        // Stand-in bar for the outro line, drifting upward
        let x = (s.actor.x + 10.0) as i32;
        let y = (s.actor.y - 64.0 - s.outro_drift() * 12.0) as i32;
        fill(&mut img, x, y, 60, 3, FG, 0.9 * outro);
    }

    img
}

fn sky(img: &mut RgbImage) {
    let h = img.height();
    for y in 0..h {
        let t = y as f32 / h as f32;
        let c = if t < 0.55 {
            mix(SKY_TOP, SKY_MID, t / 0.55)
        } else {
            mix(SKY_MID, SKY_BOT, (t - 0.55) / 0.45)
        };
        for x in 0..img.width() {
            img.put_pixel(x, y, to_rgb(c));
        }
    }
}

fn canyon(img: &mut RgbImage) {
    // Rim line the actor stands on
    fill(img, 0, RIM_Y as i32 - 1, rim_edge() as i32, 1, FG, 1.0);

    for y in RIM_Y as i32..img.height() as i32 {
        let fy = y as f32;
        let (xl, xr) = (x_left(fy), x_right(fy));
        for x in 0..img.width() as i32 {
            let fx = x as f32;
            if fy >= floor_y(fx) {
                blend(img, x, y, FG, 1.0);
            } else if fx < xl || fx > xr {
                blend(img, x, y, FG, 0.75);
            }
        }
    }
}

fn actor(img: &mut RgbImage, s: &Session) {
    let pose = s.pose();
    let x = (s.actor.x + pose.lean_x) as i32;
    let y = s.actor.y as i32;

    fill(img, x - 2, (y as f32 - 20.0 + pose.head_bob).round() as i32, 5, 5, FG, 0.75);
    fill(img, x - 2, y - 14, 5, 10, FG, 0.75);
    fill(img, x - 2, y - 4, 2, 4, FG, 0.75);
    fill(img, x + 1, y - 4, 2, 4, FG, 0.75);
}

fn fill(img: &mut RgbImage, x: i32, y: i32, w: i32, h: i32, c: [f32; 3], alpha: f32) {
    for py in y..y + h {
        for px in x..x + w {
            blend(img, px, py, c, alpha);
        }
    }
}

fn blend(img: &mut RgbImage, x: i32, y: i32, c: [f32; 3], alpha: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    let p = img.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        p.0[i] = (p.0[i] as f32 * (1.0 - alpha) + c[i] * alpha) as u8;
    }
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t, a[2] + (b[2] - a[2]) * t]
}

fn to_rgb(c: [f32; 3]) -> Rgb<u8> {
    Rgb([c[0].clamp(0.0, 255.0) as u8, c[1].clamp(0.0, 255.0) as u8, c[2].clamp(0.0, 255.0) as u8])
}
