use gdk_pixbuf::Pixbuf;
use gdk_pixbuf::prelude::*;
use navring::{Bitmap, Dimens};
use std::collections::HashMap;
use strum::IntoEnumIterator;

const CAR_SVG: &[u8] = include_bytes!("../../assets/car.svg");
const ARROW_SVG: &[u8] = include_bytes!("../../assets/arrow.svg");
const FRONT_SECTOR_SVG: &[u8] = include_bytes!("../../assets/front_sector.svg");

/// Rasterized icons, sized from the dimens they were loaded with.
pub struct Bitmaps {
    pixbufs: HashMap<Bitmap, Pixbuf>,
    car_icon_size: i32,
}

impl Bitmaps {
    pub fn load(dimens: &Dimens) -> Self {
        let pixbufs = Bitmap::iter()
            .filter_map(|bitmap| {
                let (w, h) = target_size(bitmap, dimens.car_icon_size);
                match rasterize(source(bitmap), w, h) {
                    Ok(pixbuf) => Some((bitmap, pixbuf)),
                    Err(e) => {
                        log::warn!("Failed to load bitmap '{}': {}", bitmap, e);
                        None
                    }
                }
            })
            .collect();
        Self {
            pixbufs,
            car_icon_size: dimens.car_icon_size,
        }
    }

    pub fn get(&self, bitmap: Bitmap) -> Option<&Pixbuf> {
        self.pixbufs.get(&bitmap)
    }

    pub fn size(&self, bitmap: Bitmap) -> (f64, f64) {
        match self.get(bitmap) {
            Some(pixbuf) => (pixbuf.width() as f64, pixbuf.height() as f64),
            None => {
                let (w, h) = target_size(bitmap, self.car_icon_size);
                (w as f64, h as f64)
            }
        }
    }
}

fn source(bitmap: Bitmap) -> &'static [u8] {
    match bitmap {
        Bitmap::FrontSector => FRONT_SECTOR_SVG,
        Bitmap::Car => CAR_SVG,
        Bitmap::Arrow => ARROW_SVG,
    }
}

/// Icon sizes relative to the car icon.
pub fn target_size(bitmap: Bitmap, car_icon_size: i32) -> (i32, i32) {
    match bitmap {
        Bitmap::Car => (car_icon_size, car_icon_size),
        Bitmap::Arrow => (car_icon_size / 2, car_icon_size / 2),
        Bitmap::FrontSector => (car_icon_size * 2, car_icon_size * 3 / 2),
    }
}

fn rasterize(data: &[u8], width: i32, height: i32) -> Result<Pixbuf, glib::Error> {
    let loader = gdk_pixbuf::PixbufLoader::new();
    loader.set_size(width, height);
    loader.write(data)?;
    loader.close()?;
    loader
        .pixbuf()
        .ok_or_else(|| glib::Error::new(gdk_pixbuf::PixbufError::Failed, "no image decoded"))
}
