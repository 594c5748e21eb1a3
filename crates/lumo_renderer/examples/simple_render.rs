//! Simple ray tracer example.
//!
//! Renders a small scene with every primitive type, soft shadows and
//! anti-aliasing, then saves it as a PNG.

use anyhow::{Context, Result};
use lumo_renderer::{
    color_to_rgba, AmbientLight, Camera, Color, Cylinder, DirectionalLight, ImageBuffer, Material,
    Plane, Point3, PointLight, Polygon, Primitive, RayTracer, RenderConfig, Renderer, Scene,
    ShadingConfig, Sphere, SpotLight, Triangle, Vector3,
};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 600;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Lumo Ray Tracer - Simple Example");

    let scene = build_scene()?;
    log::info!("Scene '{}' built", scene.name());

    let camera = Camera::new(Point3::new(0.0, 0.0, 1000.0), -Vector3::Z, Vector3::Y)?
        .with_view_plane_distance(1000.0)
        .with_view_plane_size(200.0, 200.0);

    let config = RenderConfig {
        anti_aliasing: true,
        anti_aliasing_rays: 4,
        adaptive: true,
        multithreading: true,
        ..Default::default()
    };
    let shading = ShadingConfig {
        soft_shadows: true,
        soft_shadow_rays: 16,
        soft_shadow_radius: 5.0,
        ..Default::default()
    };

    let tracer = RayTracer::new(&scene).with_shading(shading);
    let mut image = ImageBuffer::new(WIDTH, HEIGHT);
    let stats = Renderer::new(camera, config)
        .with_tracer(&tracer)
        .with_image_sink(&mut image)
        .render()?;
    log::info!(
        "Rendered {} pixels on {} worker(s) in {:.2?}",
        stats.pixels,
        stats.workers,
        stats.elapsed
    );

    let rgba: Vec<u8> = image.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect();
    let filename = "output.png";
    image::save_buffer(filename, &rgba, WIDTH, HEIGHT, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", filename))?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let floor = Primitive::new(Plane::new(Point3::new(0.0, -50.0, 0.0), Vector3::Y)?)
        .with_emission(Color::new(0.05, 0.05, 0.08))
        .with_material(
            Material::new()
                .with_kd_scalar(0.5)
                .with_ks_scalar(0.3)
                .with_shininess(60)
                .with_kr_scalar(0.2),
        );

    let glass_ball = Primitive::new(Sphere::new(Point3::new(-30.0, -20.0, -50.0), 30.0)?)
        .with_emission(Color::new(0.0, 0.1, 0.3))
        .with_material(
            Material::new()
                .with_kd_scalar(0.2)
                .with_ks_scalar(0.5)
                .with_shininess(100)
                .with_kt_scalar(0.5),
        );
    let inner_ball = Primitive::new(Sphere::new(Point3::new(-30.0, -20.0, -50.0), 12.0)?)
        .with_emission(Color::new(0.5, 0.1, 0.1))
        .with_material(Material::new().with_kd_scalar(0.5).with_ks_scalar(0.5).with_shininess(30));

    let pillar = Primitive::new(Cylinder::new(
        Point3::new(45.0, -50.0, -80.0),
        Vector3::Y,
        12.0,
        70.0,
    )?)
    .with_emission(Color::new(0.2, 0.15, 0.05))
    .with_material(Material::new().with_kd_scalar(0.6).with_ks_scalar(0.2).with_shininess(20));

    let mirror = Primitive::new(Polygon::new(vec![
        Point3::new(-90.0, -50.0, -140.0),
        Point3::new(90.0, -50.0, -140.0),
        Point3::new(90.0, 70.0, -160.0),
        Point3::new(-90.0, 70.0, -160.0),
    ])?)
    .with_material(Material::new().with_kr_scalar(0.6).with_ks_scalar(0.2).with_shininess(200));

    let shard = Primitive::new(Triangle::new(
        Point3::new(10.0, -50.0, -20.0),
        Point3::new(30.0, -50.0, 10.0),
        Point3::new(20.0, -10.0, -5.0),
    )?)
    .with_emission(Color::new(0.05, 0.25, 0.05))
    .with_material(Material::new().with_kd_scalar(0.4).with_ks_scalar(0.4).with_shininess(40));

    let scene = Scene::new("simple")
        .with_background(Color::new(0.02, 0.02, 0.05))
        .with_ambient_light(AmbientLight::new(Color::ONE, Color::splat(0.05)))
        .with_geometry(floor)
        .with_geometry(glass_ball)
        .with_geometry(inner_ball)
        .with_geometry(pillar)
        .with_geometry(mirror)
        .with_geometry(shard)
        .with_light(
            SpotLight::new(
                Color::new(0.8, 0.7, 0.6),
                Point3::new(-60.0, 60.0, 40.0),
                Vector3::new(1.0, -1.0, -2.0),
            )?
            .with_kl(0.0005)
            .with_kq(0.00005)
            .with_narrow_beam(4.0),
        )
        .with_light(
            PointLight::new(Color::new(0.4, 0.4, 0.5), Point3::new(60.0, 40.0, 20.0))
                .with_kl(0.0004)
                .with_kq(0.00004),
        )
        .with_light(DirectionalLight::new(
            Color::new(0.15, 0.15, 0.1),
            Vector3::new(-1.0, -1.0, -1.0),
        )?);

    Ok(scene)
}
