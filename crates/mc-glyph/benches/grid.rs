use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mc_core::frame::FrameBuffer;
use mc_glyph::table::{GlyphEntry, GlyphTable};
use mc_glyph::{Palette, frame_to_glyph_grid};

fn ascii_palette() -> Palette {
    let entries = (0..94u8)
        .map(|i| GlyphEntry::new(f32::from(i) * 2.7, char::from(b'!' + i).to_string()))
        .collect();
    Palette::Ascii(GlyphTable::from_entries(entries).unwrap_or_else(|| unreachable!()))
}

fn emoji_palette() -> Palette {
    let entries = (0..100u8)
        .map(|i| {
            let v = f32::from(i) * 2.55;
            GlyphEntry::new([v, 255.0 - v, v / 2.0], "🟩")
        })
        .collect();
    Palette::Emoji(GlyphTable::from_entries(entries).unwrap_or_else(|| unreachable!()))
}

fn gradient_frame(width: u32, height: u32) -> FrameBuffer {
    let mut frame = FrameBuffer::new(width, height);
    for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
        let v = (i % 256) as u8;
        px[0] = v;
        px[1] = v.wrapping_mul(3);
        px[2] = 255 - v;
    }
    frame
}

fn bench_grid(c: &mut Criterion) {
    let frame = gradient_frame(75, 50);
    let ascii = ascii_palette();
    let emoji = emoji_palette();

    c.bench_function("grid_ascii_75x50", |b| {
        b.iter(|| frame_to_glyph_grid(black_box(&frame), black_box(&ascii)));
    });
    c.bench_function("grid_emoji_75x50", |b| {
        b.iter(|| frame_to_glyph_grid(black_box(&frame), black_box(&emoji)));
    });
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
