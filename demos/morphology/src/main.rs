use argh::FromArgs;
use std::time::Instant;

use morpho::array::Array;
use morpho::ops::morphology::{self, structuring_element, MaskShape, MorphError};

type MorphFn = fn(&Array<u8>, &Array<u8>) -> Result<Array<u8>, MorphError>;

#[derive(FromArgs)]
/// Apply morphological operations (dilate, erode, open, close) to a
/// synthetic binary image and print ASCII renderings
struct Args {
    /// image rows (default: 24)
    #[argh(option, default = "24")]
    rows: usize,

    /// image columns (default: 48)
    #[argh(option, default = "48")]
    cols: usize,

    /// mask size (default: 3)
    #[argh(option, short = 's', default = "3")]
    mask_size: usize,

    /// mask shape: box, cross, ellipse (default: box)
    #[argh(option, short = 'k', default = "String::from(\"box\")")]
    mask_shape: String,
}

/// Render a single 2D slice as ASCII art, one character per element.
fn to_ascii(image: &Array<u8>) -> String {
    let dims = image.shape();
    let mut out = String::new();
    for i in 0..dims[0] {
        for j in 0..dims[1] {
            let v = *image.get([i, j, 0, 0]).unwrap_or(&0);
            out.push(if v > 0 { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Synthetic binary test pattern: a filled rectangle with a hole in the
/// middle, plus a few isolated speckles.
fn test_pattern(rows: usize, cols: usize) -> Array<u8> {
    Array::from_shape_fn([rows, cols], |[i, j, _, _]| {
        let in_rect = i >= rows / 4 && i < rows * 3 / 4 && j >= cols / 4 && j < cols * 3 / 4;
        let in_hole = i == rows / 2 && j == cols / 2;
        let speckle = (i * cols + j) % 97 == 0 && !in_rect;
        if (in_rect && !in_hole) || speckle {
            255
        } else {
            0
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mask_shape = match args.mask_shape.as_str() {
        "cross" => MaskShape::Cross,
        "ellipse" => MaskShape::Ellipse,
        _ => MaskShape::Box,
    };
    let mask = structuring_element::<u8>(mask_shape, args.mask_size)?;

    let image = test_pattern(args.rows, args.cols);
    println!("input:\n{}", to_ascii(&image));

    let operations: [(&str, MorphFn); 4] = [
        ("dilate", morphology::dilate),
        ("erode", morphology::erode),
        ("open", morphology::open),
        ("close", morphology::close),
    ];

    for (name, op) in operations {
        let start = Instant::now();
        let result = op(&image, &mask)?;
        log::info!("{} took {:?}", name, start.elapsed());
        println!("{}:\n{}", name, to_ascii(&result));
    }

    Ok(())
}
