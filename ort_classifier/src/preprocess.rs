//! Image-to-tensor conversion.
//!
//! Everything here is a training-time contract: the classifier was trained
//! on 224x224 RGB frames resized with nearest-neighbor resampling, laid out
//! NHWC and scaled to `[0, 1]`. Changing the filter, channel order, layout
//! or scaling does not fail loudly, it just quietly degrades predictions,
//! so keep this module in step with the model artifact.

use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;

/// Edge length the classifier expects.
pub const INPUT_SIZE: u32 = 224;

/// Classifier input layout: `[batch, height, width, channel]`.
pub type InputTensor = Array4<f32>;

/// Converts a decoded frame to the classifier's input tensor: nearest
/// neighbor to 224x224, RGB order, each channel scaled by 1/255, leading
/// batch dim of 1.
pub fn to_input_tensor(image: &DynamicImage) -> InputTensor {
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest);
    let rgb = resized.to_rgb8();

    let mut tensor = Array4::<f32>::zeros((1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        tensor[[0, y, x, 0]] = pixel[0] as f32 / 255.0;
        tensor[[0, y, x, 1]] = pixel[1] as f32 / 255.0;
        tensor[[0, y, x, 2]] = pixel[2] as f32 / 255.0;
    }
    tensor
}
