//! Rendering of small synthetic map products.

use precip_common::{GridCell, Variant};
use precip_map::{classify, ClippedPointSet, GeoPoint, MapProduct};
use renderer::{render_map, render_map_png, Legend, RenderOptions};
use test_utils::square_boundary;

fn product(values: &[(f64, f64, f32)], variant: Variant) -> MapProduct {
    let points: Vec<GeoPoint> = values
        .iter()
        .enumerate()
        .map(|(i, &(lon, lat, value))| GeoPoint {
            lon,
            lat,
            value,
            cell: GridCell::new(0, i),
        })
        .collect();
    let raw: Vec<f32> = points.iter().map(|p| p.value).collect();
    let classification = classify(&raw, variant);
    MapProduct {
        statistic: classification.statistic,
        classification,
        points: ClippedPointSet {
            points,
            boundary: square_boundary(-86.0, 37.0, -84.0, 39.0),
        },
    }
}

fn options() -> RenderOptions {
    RenderOptions {
        width: 400,
        legend_width: 100,
        marker_radius: 4.0,
        anti_alias: false,
        ..RenderOptions::default()
    }
}

fn pixel(map: &renderer::RenderedMap, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * map.width + x) * 4) as usize;
    [map.pixels[i], map.pixels[i + 1], map.pixels[i + 2], map.pixels[i + 3]]
}

fn is_chromatic(px: [u8; 4]) -> bool {
    px[0] != px[1] || px[1] != px[2]
}

#[test]
fn test_point_drawn_in_bin_color() {
    let product = product(&[(-85.0, 38.0, 3.0)], Variant::Observed);
    let map = render_map(&product, &options()).unwrap();

    assert_eq!(map.width, 400);
    assert_eq!(map.pixels.len(), (map.width * map.height * 4) as usize);

    // The single point sits at the centre of the map area.
    let cx = 300 / 2;
    let cy = map.height / 2;
    let expected = product.classification.color_for(3.0).unwrap();
    assert_eq!(pixel(&map, cx, cy), [expected.r, expected.g, expected.b, 255]);
}

#[test]
fn test_masked_points_not_drawn() {
    let product = product(&[(-85.0, 38.0, f32::NAN), (-84.5, 38.5, f32::NAN)], Variant::Observed);
    let map = render_map(&product, &options()).unwrap();

    for y in 0..map.height {
        for x in 0..300 {
            assert!(!is_chromatic(pixel(&map, x, y)), "coloured pixel at ({x}, {y})");
        }
    }
}

#[test]
fn test_empty_product_still_has_legend() {
    let product = product(&[], Variant::DeparturePercent);
    let map = render_map(&product, &options()).unwrap();

    let legend_has_colour = (0..map.height)
        .flat_map(|y| (300..map.width).map(move |x| (x, y)))
        .any(|(x, y)| is_chromatic(pixel(&map, x, y)));
    assert!(legend_has_colour);
}

#[test]
fn test_png_and_legend_outputs() {
    let product = product(&[(-85.0, 38.0, 12.0), (-84.2, 37.4, 0.3)], Variant::Observed);
    let png = render_map_png(&product, &options()).unwrap();
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let legend = Legend::new(&product.classification, product.points.visible_count(), product.points.len());
    assert_eq!(legend.bracket, 2);
    assert_eq!(legend.total_points, 2);
    assert!(legend.to_json().unwrap().contains("\"labels\""));
}
