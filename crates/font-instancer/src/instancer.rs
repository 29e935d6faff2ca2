//! Variable font instancing.

use crate::{
    AxisLocation,
    error::{Error, Result},
    glyf::{clamp_i16, glyph_x_min, instance_composite, instance_simple, resolve_composite_bboxes},
};
use read_fonts::{
    FontRef, TableProvider,
    tables::{
        fvar::{Fvar, VariationAxisRecord},
        glyf::Glyph,
        hhea::Hhea,
        mvar::{Mvar, tags as mvar_tags},
        os2::Os2,
        post::Post,
    },
    types::{F2Dot14, Fixed, GlyphId, Tag},
};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{
        glyf::{Bbox, GlyfLocaBuilder, Glyph as WriteGlyph},
        head::Head as WriteHead,
        hhea::Hhea as WriteHhea,
        hmtx::{Hmtx as WriteHmtx, LongMetric},
        loca::LocaFormat,
        os2::Os2 as WriteOs2,
        post::Post as WritePost,
        stat::{AxisRecord, AxisValue, AxisValueTableFlags, Stat},
    },
    types::NameId,
};

/// Tables that only make sense in a variable font. STAT is rebuilt for the
/// pinned location rather than carried over.
const VARIATION_TABLES: [Tag; 8] = [
    Tag::new(b"fvar"),
    Tag::new(b"gvar"),
    Tag::new(b"avar"),
    Tag::new(b"cvar"),
    Tag::new(b"HVAR"),
    Tag::new(b"MVAR"),
    Tag::new(b"VVAR"),
    Tag::new(b"STAT"),
];

/// Tables rebuilt from the instanced outlines and metrics.
const REBUILT_TABLES: [Tag; 7] = [
    Tag::new(b"glyf"),
    Tag::new(b"loca"),
    Tag::new(b"hmtx"),
    Tag::new(b"head"),
    Tag::new(b"hhea"),
    Tag::new(b"OS/2"),
    Tag::new(b"post"),
];

/// Any signature is invalidated by rewriting the font.
const DROPPED_TABLES: [Tag; 1] = [Tag::new(b"DSIG")];

/// Instantiate a variable font at the given axis locations.
///
/// Produces a static font by normalizing the user-space location, applying
/// gvar deltas to every glyph, rebuilding the metrics tables, and dropping
/// all variation tables. Tables untouched by instancing are copied through
/// byte for byte, so the result is deterministic for a given input.
///
/// # Errors
///
/// - [`Error::NotVariableFont`] if the font has no fvar table
/// - [`Error::UnsupportedOutlines`] if the font has no glyf table
/// - [`Error::NoGvar`] if the font has no gvar table
/// - [`Error::UnknownAxis`] if a location names an axis the font lacks
/// - [`Error::ValueOutOfRange`] if a value lies outside the axis range
pub fn instantiate(data: &[u8], locations: &[AxisLocation]) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;

    let fvar = font.fvar().map_err(|_| Error::NotVariableFont)?;
    let axes = fvar.axes()?;
    validate_locations(axes, locations)?;

    let glyf = font.glyf().map_err(|_| Error::UnsupportedOutlines)?;
    let loca = font.loca(None).map_err(|_| Error::UnsupportedOutlines)?;
    let gvar = font.gvar().map_err(|_| Error::NoGvar)?;

    let coords = normalized_coords(&font, &fvar, locations);

    let maxp = font.maxp()?;
    let num_glyphs = maxp.num_glyphs() as u32;

    let hmtx = font.hmtx()?;
    let hhea = font.hhea()?;
    let num_h_metrics = hhea.number_of_h_metrics() as usize;

    // Pass 1: instance every glyph, collecting simple-glyph bboxes and the
    // advance widths adjusted by phantom point deltas.
    let mut glyphs: Vec<WriteGlyph> = Vec::with_capacity(num_glyphs as usize);
    let mut glyph_bboxes: Vec<Option<Bbox>> = Vec::with_capacity(num_glyphs as usize);
    let mut advances: Vec<u16> = Vec::with_capacity(num_glyphs as usize);
    let mut fallback_lsbs: Vec<i16> = Vec::with_capacity(num_glyphs as usize);

    for glyph_id in 0..num_glyphs {
        let gid = GlyphId::new(glyph_id);

        let aw_delta = match gvar.phantom_point_deltas(&glyf, &loca, &coords, gid) {
            Ok(Some(deltas)) => deltas.get(1).map(|d| d.x.to_i32() as i16).unwrap_or(0),
            _ => 0,
        };

        let orig_advance = hmtx.advance(gid).unwrap_or(0);
        advances.push((i32::from(orig_advance) + i32::from(aw_delta)).max(0) as u16);
        fallback_lsbs.push(hmtx.side_bearing(gid).unwrap_or(0));

        let Some(glyph) = loca.get_glyf(gid, &glyf).ok().flatten() else {
            glyphs.push(WriteGlyph::Empty);
            glyph_bboxes.push(None);
            continue;
        };

        match glyph {
            Glyph::Simple(simple) => {
                let new_glyph = instance_simple(&simple, &gvar, gid, &coords)?;
                glyph_bboxes.push(new_glyph.bbox());
                glyphs.push(new_glyph);
            }
            Glyph::Composite(composite) => {
                let new_glyph = instance_composite(&composite, &gvar, gid, &coords)?;
                // Resolved in pass 2 once the component bboxes exist.
                glyph_bboxes.push(None);
                glyphs.push(new_glyph);
            }
        }
    }

    // Pass 2: composite bboxes from the now-known component bboxes.
    resolve_composite_bboxes(&mut glyphs, &mut glyph_bboxes);

    // Pass 3: build glyf/loca, accumulate font-wide bounds, derive LSBs.
    let mut glyf_builder = GlyfLocaBuilder::new();
    let mut bounds = Bounds::new();
    let mut lsbs: Vec<i16> = Vec::with_capacity(num_glyphs as usize);

    for (i, glyph) in glyphs.iter().enumerate() {
        // After interpolation the LSB is the glyph's new xMin.
        let lsb = glyph_x_min(glyph).unwrap_or(fallback_lsbs[i]);
        lsbs.push(lsb);
        bounds.update(glyph, advances[i]);
        glyf_builder.add_glyph(glyph)?;
    }

    bounds.finalize();

    let (new_glyf, new_loca, loca_format) = glyf_builder.build();

    let mvar = font.mvar().ok();

    let mut builder = FontBuilder::new();
    builder.add_table(&new_glyf)?;
    builder.add_table(&new_loca)?;
    builder.add_table(&rebuild_hmtx(&advances, &lsbs, num_h_metrics))?;

    if let Ok(head) = font.head() {
        let new_head = WriteHead::new(
            head.font_revision(),
            head.checksum_adjustment(),
            head.flags(),
            head.units_per_em(),
            head.created(),
            head.modified(),
            bounds.x_min,
            bounds.y_min,
            bounds.x_max,
            bounds.y_max,
            head.mac_style(),
            head.lowest_rec_ppem(),
            match loca_format {
                LocaFormat::Short => 0,
                LocaFormat::Long => 1,
            },
        );
        builder.add_table(&new_head)?;
    }

    if let Ok(hhea) = font.hhea() {
        builder.add_table(&rebuild_hhea(&hhea, &bounds, mvar.as_ref(), &coords))?;
    }

    if let Ok(os2) = font.os2() {
        builder.add_table(&rebuild_os2(&os2, mvar.as_ref(), &coords, locations))?;
    }

    if let Ok(post) = font.post() {
        builder.add_table(&rebuild_post(&post, mvar.as_ref(), &coords))?;
    }

    builder.add_table(&rebuild_stat(axes, locations))?;

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if !VARIATION_TABLES.contains(&tag)
            && !REBUILT_TABLES.contains(&tag)
            && !DROPPED_TABLES.contains(&tag)
            && let Some(data) = font.table_data(tag)
        {
            builder.add_raw(tag, data);
        }
    }

    Ok(builder.build())
}

fn validate_locations(axes: &[VariationAxisRecord], locations: &[AxisLocation]) -> Result<()> {
    for loc in locations {
        let Some(axis) = axes.iter().find(|a| a.axis_tag() == loc.tag) else {
            return Err(Error::UnknownAxis(loc.tag));
        };

        let min = axis.min_value().to_f64() as f32;
        let max = axis.max_value().to_f64() as f32;
        if loc.value < min || loc.value > max {
            return Err(Error::ValueOutOfRange {
                tag: loc.tag,
                value: loc.value,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Map the user-space location to normalized coordinates, avar included.
fn normalized_coords(font: &FontRef, fvar: &Fvar, locations: &[AxisLocation]) -> Vec<F2Dot14> {
    let avar = font.avar().ok();
    let mut coords = vec![F2Dot14::default(); fvar.axis_count() as usize];

    let user_coords: Vec<(Tag, Fixed)> = locations
        .iter()
        .map(|loc| (loc.tag, Fixed::from_f64(f64::from(loc.value))))
        .collect();

    fvar.user_to_normalized(avar.as_ref(), user_coords, &mut coords);
    coords
}

fn rebuild_hmtx(advances: &[u16], lsbs: &[i16], num_h_metrics: usize) -> WriteHmtx {
    let num_glyphs = advances.len();
    let mut h_metrics = Vec::with_capacity(num_h_metrics);
    let mut left_side_bearings = Vec::with_capacity(num_glyphs.saturating_sub(num_h_metrics));

    for gid in 0..num_glyphs {
        if gid < num_h_metrics {
            h_metrics.push(LongMetric {
                advance: advances[gid],
                side_bearing: lsbs[gid],
            });
        } else {
            left_side_bearings.push(lsbs[gid]);
        }
    }

    WriteHmtx {
        h_metrics,
        left_side_bearings,
    }
}

/// Font-wide bounds and bearing extremes accumulated over the instanced
/// glyphs, feeding head and hhea.
#[derive(Debug, Clone, Copy, Default)]
struct Bounds {
    x_min: i16,
    x_max: i16,
    y_min: i16,
    y_max: i16,
    min_left_side_bearing: i16,
    min_right_side_bearing: i16,
    x_max_extent: i16,
    advance_width_max: u16,
}

impl Bounds {
    fn new() -> Self {
        Bounds {
            x_min: i16::MAX,
            x_max: i16::MIN,
            y_min: i16::MAX,
            y_max: i16::MIN,
            min_left_side_bearing: i16::MAX,
            min_right_side_bearing: i16::MAX,
            x_max_extent: i16::MIN,
            advance_width_max: 0,
        }
    }

    fn update(&mut self, glyph: &WriteGlyph, advance: u16) {
        self.advance_width_max = self.advance_width_max.max(advance);

        let bbox = match glyph {
            WriteGlyph::Simple(s) => s.bbox,
            WriteGlyph::Composite(c) => c.bbox,
            WriteGlyph::Empty => return,
        };

        if bbox.x_min == 0 && bbox.x_max == 0 && bbox.y_min == 0 && bbox.y_max == 0 {
            return;
        }

        self.x_min = self.x_min.min(bbox.x_min);
        self.x_max = self.x_max.max(bbox.x_max);
        self.y_min = self.y_min.min(bbox.y_min);
        self.y_max = self.y_max.max(bbox.y_max);

        let lsb = bbox.x_min;
        self.min_left_side_bearing = self.min_left_side_bearing.min(lsb);

        // RSB = advance - LSB - glyph width
        let glyph_width = bbox.x_max.saturating_sub(bbox.x_min);
        let rsb = (advance as i16)
            .saturating_sub(lsb)
            .saturating_sub(glyph_width);
        self.min_right_side_bearing = self.min_right_side_bearing.min(rsb);

        self.x_max_extent = self.x_max_extent.max(lsb.saturating_add(glyph_width));
    }

    fn finalize(&mut self) {
        if self.x_min == i16::MAX {
            self.x_min = 0;
        }
        if self.x_max == i16::MIN {
            self.x_max = 0;
        }
        if self.y_min == i16::MAX {
            self.y_min = 0;
        }
        if self.y_max == i16::MIN {
            self.y_max = 0;
        }
        if self.min_left_side_bearing == i16::MAX {
            self.min_left_side_bearing = 0;
        }
        if self.min_right_side_bearing == i16::MAX {
            self.min_right_side_bearing = 0;
        }
        if self.x_max_extent == i16::MIN {
            self.x_max_extent = 0;
        }
    }
}

fn mvar_delta(mvar: Option<&Mvar>, tag: Tag, coords: &[F2Dot14]) -> i32 {
    mvar.and_then(|m| m.metric_delta(tag, coords).ok())
        .map(|f| f.to_i32())
        .unwrap_or(0)
}

fn rebuild_hhea(
    original: &Hhea,
    bounds: &Bounds,
    mvar: Option<&Mvar>,
    coords: &[F2Dot14],
) -> WriteHhea {
    let ascender = mvar_delta(mvar, mvar_tags::HASC, coords);
    let descender = mvar_delta(mvar, mvar_tags::HDSC, coords);
    let line_gap = mvar_delta(mvar, mvar_tags::HLGP, coords);
    let caret_rise = mvar_delta(mvar, mvar_tags::HCRS, coords);
    let caret_run = mvar_delta(mvar, mvar_tags::HCRN, coords);
    let caret_offset = mvar_delta(mvar, mvar_tags::HCOF, coords);

    WriteHhea::new(
        clamp_i16(i32::from(original.ascender().to_i16()) + ascender).into(),
        clamp_i16(i32::from(original.descender().to_i16()) + descender).into(),
        clamp_i16(i32::from(original.line_gap().to_i16()) + line_gap).into(),
        bounds.advance_width_max.into(),
        bounds.min_left_side_bearing.into(),
        bounds.min_right_side_bearing.into(),
        bounds.x_max_extent.into(),
        clamp_i16(i32::from(original.caret_slope_rise()) + caret_rise),
        clamp_i16(i32::from(original.caret_slope_run()) + caret_run),
        clamp_i16(i32::from(original.caret_offset()) + caret_offset),
        original.number_of_h_metrics(),
    )
}

/// Map a wdth axis value (a percentage, usually 50-200) onto the OS/2
/// usWidthClass scale (1-9, Ultra-condensed through Ultra-expanded).
fn width_class_for_wdth(wdth: f32) -> u16 {
    match wdth {
        w if w <= 56.25 => 1,
        w if w <= 68.75 => 2,
        w if w <= 81.25 => 3,
        w if w <= 93.75 => 4,
        w if w <= 106.25 => 5,
        w if w <= 118.75 => 6,
        w if w <= 137.5 => 7,
        w if w <= 175.0 => 8,
        _ => 9,
    }
}

fn rebuild_os2(
    original: &Os2,
    mvar: Option<&Mvar>,
    coords: &[F2Dot14],
    locations: &[AxisLocation],
) -> WriteOs2 {
    let mut os2: WriteOs2 = original.to_owned_table();

    // The pinned weight and width become the face's weight/width classes.
    if let Some(wght) = locations.iter().find(|loc| loc.tag == Tag::new(b"wght")) {
        os2.us_weight_class = wght.value.round() as u16;
    }
    if let Some(wdth) = locations.iter().find(|loc| loc.tag == Tag::new(b"wdth")) {
        os2.us_width_class = width_class_for_wdth(wdth.value);
    }

    os2.y_strikeout_size = clamp_i16(
        i32::from(original.y_strikeout_size()) + mvar_delta(mvar, mvar_tags::STRS, coords),
    );
    os2.y_strikeout_position = clamp_i16(
        i32::from(original.y_strikeout_position()) + mvar_delta(mvar, mvar_tags::STRO, coords),
    );
    os2.s_typo_ascender = clamp_i16(
        i32::from(original.s_typo_ascender()) + mvar_delta(mvar, mvar_tags::HASC, coords),
    );
    os2.s_typo_descender = clamp_i16(
        i32::from(original.s_typo_descender()) + mvar_delta(mvar, mvar_tags::HDSC, coords),
    );
    os2.s_typo_line_gap = clamp_i16(
        i32::from(original.s_typo_line_gap()) + mvar_delta(mvar, mvar_tags::HLGP, coords),
    );

    os2.y_subscript_x_offset = clamp_i16(
        i32::from(original.y_subscript_x_offset()) + mvar_delta(mvar, mvar_tags::SBXO, coords),
    );
    os2.y_subscript_y_offset = clamp_i16(
        i32::from(original.y_subscript_y_offset()) + mvar_delta(mvar, mvar_tags::SBYO, coords),
    );
    os2.y_subscript_x_size = clamp_i16(
        i32::from(original.y_subscript_x_size()) + mvar_delta(mvar, mvar_tags::SBXS, coords),
    );
    os2.y_subscript_y_size = clamp_i16(
        i32::from(original.y_subscript_y_size()) + mvar_delta(mvar, mvar_tags::SBYS, coords),
    );

    os2.y_superscript_x_offset = clamp_i16(
        i32::from(original.y_superscript_x_offset()) + mvar_delta(mvar, mvar_tags::SPXO, coords),
    );
    os2.y_superscript_y_offset = clamp_i16(
        i32::from(original.y_superscript_y_offset()) + mvar_delta(mvar, mvar_tags::SPYO, coords),
    );
    os2.y_superscript_x_size = clamp_i16(
        i32::from(original.y_superscript_x_size()) + mvar_delta(mvar, mvar_tags::SPXS, coords),
    );
    os2.y_superscript_y_size = clamp_i16(
        i32::from(original.y_superscript_y_size()) + mvar_delta(mvar, mvar_tags::SPYS, coords),
    );

    if let Some(sx_height) = original.sx_height() {
        os2.sx_height = Some(clamp_i16(
            i32::from(sx_height) + mvar_delta(mvar, mvar_tags::XHGT, coords),
        ));
    }

    if let Some(s_cap_height) = original.s_cap_height() {
        os2.s_cap_height = Some(clamp_i16(
            i32::from(s_cap_height) + mvar_delta(mvar, mvar_tags::CPHT, coords),
        ));
    }

    os2
}

fn rebuild_post(original: &Post, mvar: Option<&Mvar>, coords: &[F2Dot14]) -> WritePost {
    let mut post: WritePost = original.to_owned_table();

    let position = mvar_delta(mvar, mvar_tags::UNDO, coords);
    let thickness = mvar_delta(mvar, mvar_tags::UNDS, coords);

    post.underline_position =
        clamp_i16(i32::from(original.underline_position().to_i16()) + position).into();
    post.underline_thickness =
        clamp_i16(i32::from(original.underline_thickness().to_i16()) + thickness).into();

    post
}

/// A STAT table describing the fixed location the font was pinned to.
fn rebuild_stat(axes: &[VariationAxisRecord], locations: &[AxisLocation]) -> Stat {
    let design_axes: Vec<AxisRecord> = axes
        .iter()
        .enumerate()
        .map(|(i, axis)| AxisRecord::new(axis.axis_tag(), axis.axis_name_id(), i as u16))
        .collect();

    let axis_values: Vec<AxisValue> = locations
        .iter()
        .filter_map(|loc| {
            let axis_index = axes.iter().position(|a| a.axis_tag() == loc.tag)?;
            let axis = &axes[axis_index];

            let mut flags = AxisValueTableFlags::empty();
            if loc.value == axis.default_value().to_f64() as f32 {
                flags |= AxisValueTableFlags::ELIDABLE_AXIS_VALUE_NAME;
            }

            Some(AxisValue::format_1(
                axis_index as u16,
                flags,
                axis.axis_name_id(),
                Fixed::from_f64(f64::from(loc.value)),
            ))
        })
        .collect();

    Stat::new(design_axes, axis_values, NameId::new(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_coords(font: &FontRef, glyph_id: u32) -> Option<Vec<(i16, i16)>> {
        let glyf = font.glyf().ok()?;
        let loca = font.loca(None).ok()?;
        let glyph = loca.get_glyf(GlyphId::new(glyph_id), &glyf).ok()??;

        match glyph {
            Glyph::Simple(simple) => Some(simple.points().map(|p| (p.x, p.y)).collect()),
            Glyph::Composite(_) => None,
        }
    }

    fn advance_width(font: &FontRef, glyph_id: u32) -> Option<u16> {
        font.hmtx().ok()?.advance(GlyphId::new(glyph_id))
    }

    #[test]
    fn pins_to_static_at_default() {
        let data = font_test_data::VAZIRMATN_VAR;
        let result = instantiate(data, &[AxisLocation::new("wght", 400.0)]).unwrap();

        let output = FontRef::new(&result).unwrap();
        assert!(output.fvar().is_err());
        assert!(output.gvar().is_err());
        assert!(output.glyf().is_ok());
        assert!(output.hmtx().is_ok());
    }

    #[test]
    fn strips_variation_tables_but_keeps_stat() {
        let data = font_test_data::VAZIRMATN_VAR;
        let result = instantiate(data, &[AxisLocation::new("wght", 700.0)]).unwrap();

        let output = FontRef::new(&result).unwrap();
        for tag in [b"fvar", b"gvar", b"avar", b"cvar", b"HVAR", b"MVAR", b"VVAR"] {
            assert!(
                output.table_data(Tag::new(tag)).is_none(),
                "expected no {} table",
                Tag::new(tag)
            );
        }
        assert!(output.table_data(Tag::new(b"STAT")).is_some());
        assert!(output.table_data(Tag::new(b"DSIG")).is_none());
    }

    #[test]
    fn pins_at_axis_extremes() {
        let data = font_test_data::VAZIRMATN_VAR;

        for wght in [100.0, 900.0] {
            let result = instantiate(data, &[AxisLocation::new("wght", wght)]).unwrap();
            let output = FontRef::new(&result).unwrap();
            assert!(output.fvar().is_err());
            assert!(glyph_coords(&output, 1).is_some());
        }
    }

    #[test]
    fn preserves_glyph_count() {
        let data = font_test_data::VAZIRMATN_VAR;
        let input_count = FontRef::new(data).unwrap().maxp().unwrap().num_glyphs();

        let result = instantiate(data, &[AxisLocation::new("wght", 700.0)]).unwrap();
        let output_count = FontRef::new(&result).unwrap().maxp().unwrap().num_glyphs();

        assert_eq!(input_count, output_count);
    }

    #[test]
    fn advance_widths_respond_to_weight() {
        let data = font_test_data::VAZIRMATN_VAR;

        let thin = instantiate(data, &[AxisLocation::new("wght", 100.0)]).unwrap();
        let black = instantiate(data, &[AxisLocation::new("wght", 900.0)]).unwrap();

        let aw_thin = advance_width(&FontRef::new(&thin).unwrap(), 1).unwrap();
        let aw_black = advance_width(&FontRef::new(&black).unwrap(), 1).unwrap();

        assert_ne!(aw_thin, aw_black);
    }

    #[test]
    fn coordinates_differ_at_extremes() {
        let data = font_test_data::VAZIRMATN_VAR;

        let thin = instantiate(data, &[AxisLocation::new("wght", 100.0)]).unwrap();
        let black = instantiate(data, &[AxisLocation::new("wght", 900.0)]).unwrap();

        let coords_thin = glyph_coords(&FontRef::new(&thin).unwrap(), 1).unwrap();
        let coords_black = glyph_coords(&FontRef::new(&black).unwrap(), 1).unwrap();

        assert_eq!(coords_thin.len(), coords_black.len());
        assert_ne!(coords_thin, coords_black);
    }

    #[test]
    fn rejects_cff_outlines() {
        let data = font_test_data::CANTARELL_VF_TRIMMED;
        let result = instantiate(data, &[AxisLocation::new("wght", 700.0)]);
        assert!(matches!(result, Err(Error::UnsupportedOutlines)));
    }

    #[test]
    fn rejects_static_font() {
        let data = font_test_data::SIMPLE_GLYF;
        let result = instantiate(data, &[AxisLocation::new("wght", 400.0)]);
        assert!(matches!(result, Err(Error::NotVariableFont)));
    }

    #[test]
    fn rejects_unknown_axis() {
        // Vazirmatn only declares wght.
        let data = font_test_data::VAZIRMATN_VAR;
        let result = instantiate(data, &[AxisLocation::new("wdth", 100.0)]);
        assert!(matches!(result, Err(Error::UnknownAxis(tag)) if tag == Tag::new(b"wdth")));
    }

    #[test]
    fn rejects_out_of_range_value() {
        // Vazirmatn's wght spans 100..900.
        let data = font_test_data::VAZIRMATN_VAR;
        let result = instantiate(data, &[AxisLocation::new("wght", 1000.0)]);
        assert!(matches!(
            result,
            Err(Error::ValueOutOfRange { value, .. }) if value == 1000.0
        ));
    }

    #[test]
    fn empty_location_pins_defaults() {
        let data = font_test_data::VAZIRMATN_VAR;
        let result = instantiate(data, &[]).unwrap();

        let output = FontRef::new(&result).unwrap();
        assert!(output.fvar().is_err());
    }

    #[test]
    fn output_is_deterministic() {
        let data = font_test_data::VAZIRMATN_VAR;
        let location = [AxisLocation::new("wght", 500.0)];

        let first = instantiate(data, &location).unwrap();
        let second = instantiate(data, &location).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn lsb_equals_glyph_xmin() {
        let data = font_test_data::VAZIRMATN_VAR;

        // An interpolated position, away from any master.
        let result = instantiate(data, &[AxisLocation::new("wght", 500.0)]).unwrap();
        let font = FontRef::new(&result).unwrap();

        let glyf = font.glyf().unwrap();
        let loca = font.loca(None).unwrap();
        let hmtx = font.hmtx().unwrap();

        for gid in 1..font.maxp().unwrap().num_glyphs().min(20) {
            let glyph_id = GlyphId::new(gid as u32);
            let lsb = hmtx.side_bearing(glyph_id).unwrap_or(0);

            if let Some(Glyph::Simple(simple)) = loca.get_glyf(glyph_id, &glyf).ok().flatten()
                && simple.num_points() > 0
            {
                let x_min = simple.points().map(|p| p.x).min().unwrap_or(0);
                assert_eq!(
                    lsb, x_min,
                    "glyph {gid}: LSB ({lsb}) should equal xMin ({x_min})"
                );
            }
        }
    }

    #[test]
    fn width_class_covers_the_scale() {
        assert_eq!(width_class_for_wdth(50.0), 1);
        assert_eq!(width_class_for_wdth(75.0), 3);
        assert_eq!(width_class_for_wdth(100.0), 5);
        assert_eq!(width_class_for_wdth(125.0), 7);
        assert_eq!(width_class_for_wdth(200.0), 9);
    }
}
