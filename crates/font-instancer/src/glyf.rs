//! Glyph-level delta application.
//!
//! Applies gvar deltas to simple and composite glyphs at a normalized
//! location, including IUP for sparse tuples, and resolves composite
//! bounding boxes once all component glyphs are known.

use crate::error::Result;
use read_fonts::{
    tables::{
        glyf::{
            Anchor as ReadAnchor, CompositeGlyph as ReadCompositeGlyph, CurvePoint, PointFlags,
            SimpleGlyph as ReadSimpleGlyph,
        },
        gvar::Gvar,
    },
    types::{F2Dot14, Fixed, GlyphId, Point},
};
use std::iter::repeat_n;
use write_fonts::tables::glyf::{Bbox, CompositeGlyph, Contour, Glyph as WriteGlyph, SimpleGlyph};

/// Every glyph carries four phantom points (left/right/top/bottom metrics).
const PHANTOM_POINTS: usize = 4;

pub(crate) fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// xMin of a rebuilt glyph, if it has outlines.
pub(crate) fn glyph_x_min(glyph: &WriteGlyph) -> Option<i16> {
    match glyph {
        WriteGlyph::Simple(s) => Some(s.bbox.x_min),
        WriteGlyph::Composite(c) => Some(c.bbox.x_min),
        WriteGlyph::Empty => None,
    }
}

/// Apply gvar deltas to a simple glyph and rebuild it with a fresh bbox.
///
/// Deltas accumulate in 16.16 fixed point so fractional contributions from
/// multiple tuples survive until the final rounding.
pub(crate) fn instance_simple(
    simple: &ReadSimpleGlyph,
    gvar: &Gvar,
    glyph_id: GlyphId,
    coords: &[F2Dot14],
) -> Result<WriteGlyph> {
    let num_points = simple.num_points();
    if num_points == 0 {
        return Ok(WriteGlyph::Empty);
    }

    let contour_ends: Vec<usize> = simple
        .end_pts_of_contours()
        .iter()
        .map(|x| x.get() as usize)
        .collect();

    let mut points: Vec<Point<Fixed>> = Vec::with_capacity(num_points + PHANTOM_POINTS);
    let mut flags: Vec<PointFlags> = Vec::with_capacity(num_points + PHANTOM_POINTS);

    for point in simple.points() {
        points.push(Point::new(
            Fixed::from_i32(point.x as i32),
            Fixed::from_i32(point.y as i32),
        ));
        flags.push(if point.on_curve {
            PointFlags::on_curve()
        } else {
            PointFlags::off_curve_quad()
        });
    }

    for _ in 0..PHANTOM_POINTS {
        points.push(Point::default());
        flags.push(PointFlags::on_curve());
    }

    if let Ok(Some(variations)) = gvar.glyph_variation_data(glyph_id) {
        for (tuple, scalar) in variations.active_tuples_at(coords) {
            if tuple.has_deltas_for_all_points() {
                for delta in tuple.deltas() {
                    let idx = delta.position as usize;
                    if let Some(point) = points.get_mut(idx) {
                        let scaled: Point<Fixed> = delta.apply_scalar(scalar);
                        point.x += scaled.x;
                        point.y += scaled.y;
                    }
                }
            } else {
                // Sparse tuple: untouched points get interpolated deltas (IUP).
                let mut touched = vec![false; points.len()];
                let mut tuple_deltas = vec![Point::<Fixed>::default(); points.len()];

                for delta in tuple.deltas() {
                    let idx = delta.position as usize;
                    if let Some(slot) = tuple_deltas.get_mut(idx) {
                        touched[idx] = true;
                        *slot = delta.apply_scalar(scalar);
                    }
                }

                // IUP is defined over integer coordinates.
                let points_i32: Vec<Point<i32>> = points
                    .iter()
                    .map(|p| Point::new(p.x.to_i32(), p.y.to_i32()))
                    .collect();
                let mut deltas_i32: Vec<Point<i32>> = tuple_deltas
                    .iter()
                    .map(|d| Point::new(d.x.to_i32(), d.y.to_i32()))
                    .collect();

                let mut start = 0;
                for &end in &contour_ends {
                    iup_contour(&mut deltas_i32, &touched, &points_i32, start, end);
                    start = end + 1;
                }

                for (point, delta) in points.iter_mut().zip(&deltas_i32) {
                    point.x += Fixed::from_i32(delta.x);
                    point.y += Fixed::from_i32(delta.y);
                }
            }
        }
    }

    let mut contours = Vec::with_capacity(contour_ends.len());
    let mut start = 0;
    for &end in &contour_ends {
        let contour_points: Vec<CurvePoint> = (start..=end)
            .map(|i| {
                CurvePoint::new(
                    clamp_i16(points[i].x.round().to_i32()),
                    clamp_i16(points[i].y.round().to_i32()),
                    flags[i].is_on_curve(),
                )
            })
            .collect();
        contours.push(Contour::from(contour_points));
        start = end + 1;
    }

    let mut glyph = SimpleGlyph {
        bbox: Bbox::default(),
        contours,
        instructions: simple.instructions().to_vec(),
    };
    glyph.recompute_bounding_box();

    Ok(WriteGlyph::Simple(glyph))
}

/// Apply gvar deltas to a composite glyph's component offsets.
///
/// The bbox is left unresolved here; `resolve_composite_bboxes` fills it in
/// once every component glyph has one.
pub(crate) fn instance_composite(
    composite: &ReadCompositeGlyph,
    gvar: &Gvar,
    glyph_id: GlyphId,
    coords: &[F2Dot14],
) -> Result<WriteGlyph> {
    use write_fonts::tables::glyf::{Anchor, Component, ComponentFlags, Transform};

    let components: Vec<_> = composite.components().collect();
    if components.is_empty() {
        return Ok(WriteGlyph::Empty);
    }

    let mut offsets: Vec<Point<Fixed>> = components
        .iter()
        .map(|c| match c.anchor {
            ReadAnchor::Offset { x, y } => {
                Point::new(Fixed::from_i32(x as i32), Fixed::from_i32(y as i32))
            }
            ReadAnchor::Point { .. } => Point::default(),
        })
        .collect();

    offsets.extend(repeat_n(Point::default(), PHANTOM_POINTS));

    if let Ok(Some(variations)) = gvar.glyph_variation_data(glyph_id) {
        for (tuple, scalar) in variations.active_tuples_at(coords) {
            for delta in tuple.deltas() {
                let idx = delta.position as usize;
                if let Some(point) = offsets.get_mut(idx) {
                    let scaled: Point<Fixed> = delta.apply_scalar(scalar);
                    point.x += scaled.x;
                    point.y += scaled.y;
                }
            }
        }
    }

    let mut new_components = components.iter().enumerate().map(|(i, comp)| {
        let anchor = match comp.anchor {
            ReadAnchor::Offset { .. } => Anchor::Offset {
                x: clamp_i16(offsets[i].x.round().to_i32()),
                y: clamp_i16(offsets[i].y.round().to_i32()),
            },
            ReadAnchor::Point { base, component } => Anchor::Point { base, component },
        };

        let t = comp.transform;
        let transform = Transform {
            xx: t.xx,
            yx: t.yx,
            xy: t.xy,
            yy: t.yy,
        };

        Component::new(comp.glyph, anchor, transform, ComponentFlags::default())
    });

    let Some(first) = new_components.next() else {
        return Ok(WriteGlyph::Empty);
    };
    let bbox = kurbo::Rect::new(
        composite.x_min() as f64,
        composite.y_min() as f64,
        composite.x_max() as f64,
        composite.y_max() as f64,
    );

    let mut new_composite = CompositeGlyph::new(first, bbox);
    for comp in new_components {
        new_composite.add_component(comp, kurbo::Rect::ZERO);
    }

    Ok(WriteGlyph::Composite(new_composite))
}

/// Fill in composite bboxes from their components' resolved bboxes.
///
/// Composites may reference other composites, so this iterates until a full
/// pass makes no progress.
pub(crate) fn resolve_composite_bboxes(glyphs: &mut [WriteGlyph], bboxes: &mut [Option<Bbox>]) {
    let mut changed = true;
    while changed {
        changed = false;
        for glyph_id in 0..glyphs.len() {
            if bboxes[glyph_id].is_some() {
                continue;
            }

            let WriteGlyph::Composite(composite) = &glyphs[glyph_id] else {
                continue;
            };

            if let Some(bbox) = composite_bbox(composite, bboxes) {
                bboxes[glyph_id] = Some(bbox);
                if let WriteGlyph::Composite(c) = &mut glyphs[glyph_id] {
                    c.bbox = bbox;
                }
                changed = true;
            }
        }
    }
}

/// Union of the transformed component bboxes.
/// Returns None while any non-empty component is still unresolved.
fn composite_bbox(composite: &CompositeGlyph, bboxes: &[Option<Bbox>]) -> Option<Bbox> {
    use write_fonts::tables::glyf::Anchor;

    let mut x_min = i16::MAX;
    let mut y_min = i16::MAX;
    let mut x_max = i16::MIN;
    let mut y_max = i16::MIN;
    let mut has_content = false;

    for comp in composite.components() {
        let component_gid = comp.glyph.to_u32() as usize;

        let component_bbox = match bboxes.get(component_gid) {
            Some(Some(bbox)) => bbox,
            // Empty glyph (e.g., space).
            Some(None) => continue,
            // Component not yet resolved; retry on a later pass.
            None => return None,
        };

        if component_bbox.x_min == 0
            && component_bbox.x_max == 0
            && component_bbox.y_min == 0
            && component_bbox.y_max == 0
        {
            continue;
        }

        let (offset_x, offset_y) = match comp.anchor {
            Anchor::Offset { x, y } => (x as f64, y as f64),
            Anchor::Point { .. } => (0.0, 0.0),
        };

        let t = &comp.transform;
        let xx = t.xx.to_f32() as f64;
        let xy = t.xy.to_f32() as f64;
        let yx = t.yx.to_f32() as f64;
        let yy = t.yy.to_f32() as f64;

        let corners = [
            (component_bbox.x_min as f64, component_bbox.y_min as f64),
            (component_bbox.x_min as f64, component_bbox.y_max as f64),
            (component_bbox.x_max as f64, component_bbox.y_min as f64),
            (component_bbox.x_max as f64, component_bbox.y_max as f64),
        ];

        for (cx, cy) in corners {
            let tx = xx * cx + xy * cy + offset_x;
            let ty = yx * cx + yy * cy + offset_y;

            let ix = tx.round() as i16;
            let iy = ty.round() as i16;

            x_min = x_min.min(ix);
            y_min = y_min.min(iy);
            x_max = x_max.max(ix);
            y_max = y_max.max(iy);
            has_content = true;
        }
    }

    if !has_content {
        return Some(Bbox {
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
        });
    }

    Some(Bbox {
        x_min,
        y_min,
        x_max,
        y_max,
    })
}

fn iup_contour(
    deltas: &mut [Point<i32>],
    touched: &[bool],
    points: &[Point<i32>],
    start: usize,
    end: usize,
) {
    if start > end {
        return;
    }

    let contour_len = end - start + 1;
    let Some(first_touched) = (0..contour_len).position(|i| touched[start + i]) else {
        return;
    };

    let mut touched_points = vec![first_touched];
    let mut i = (first_touched + 1) % contour_len;
    while i != first_touched {
        if touched[start + i] {
            touched_points.push(i);
        }
        i = (i + 1) % contour_len;
    }

    // A single touched point moves the whole contour rigidly.
    if touched_points.len() == 1 {
        let touch = touched_points[0];
        let d = deltas[start + touch];
        for i in 0..contour_len {
            if i != touch {
                deltas[start + i] = d;
            }
        }
        return;
    }

    for window in touched_points.windows(2) {
        iup_span(deltas, points, start, contour_len, window[0], window[1]);
    }

    let last = *touched_points.last().unwrap();
    let first = touched_points[0];
    iup_span(deltas, points, start, contour_len, last, first);
}

/// Interpolate deltas for the untouched points strictly between two
/// touched points on the same contour.
fn iup_span(
    deltas: &mut [Point<i32>],
    points: &[Point<i32>],
    start: usize,
    contour_len: usize,
    touch1: usize,
    touch2: usize,
) {
    if (touch1 + 1) % contour_len == touch2 {
        return;
    }

    let p1 = points[start + touch1];
    let p2 = points[start + touch2];
    let d1 = deltas[start + touch1];
    let d2 = deltas[start + touch2];

    let mut i = (touch1 + 1) % contour_len;
    while i != touch2 {
        let p = points[start + i];
        deltas[start + i] = Point::new(
            iup_coord(p1.x, p2.x, p.x, d1.x, d2.x),
            iup_coord(p1.y, p2.y, p.y, d1.y, d2.y),
        );
        i = (i + 1) % contour_len;
    }
}

fn iup_coord(c1: i32, c2: i32, c: i32, d1: i32, d2: i32) -> i32 {
    if c1 == c2 {
        return if d1 == d2 { d1 } else { 0 };
    }

    let (c1, c2, d1, d2) = if c1 > c2 {
        (c2, c1, d2, d1)
    } else {
        (c1, c2, d1, d2)
    };

    if c <= c1 {
        d1
    } else if c >= c2 {
        d2
    } else {
        let t = (c - c1) as f64 / (c2 - c1) as f64;
        (d1 as f64 + t * (d2 - d1) as f64).round() as i32
    }
}
