//! Flag textures backed by `<img>` elements. Each texture holds a blank
//! pixel until its image finishes loading; a failed load leaves it blank.

use std::collections::HashMap;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::{DemoError, Result};
use crate::textures::FlagTexture;

pub struct TextureProvider {
    textures: HashMap<FlagTexture, WebGlTexture>,
}

impl TextureProvider {
    /// Creates all textures and starts the image requests.
    pub fn load(gl: &GL) -> Result<Self> {
        let mut textures = HashMap::new();
        for flag in FlagTexture::ALL {
            let texture = gl
                .create_texture()
                .ok_or(DemoError::ResourceAllocation("texture"))?;
            gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
            gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
                GL::TEXTURE_2D,
                0,
                GL::RGBA as i32,
                1,
                1,
                0,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                Some(&[0u8, 0, 0, 255][..]),
            )?;
            gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
            request_image(gl, &texture, flag)?;
            textures.insert(flag, texture);
        }
        gl.bind_texture(GL::TEXTURE_2D, None);
        Ok(Self { textures })
    }

    pub fn get(&self, flag: FlagTexture) -> Option<&WebGlTexture> {
        self.textures.get(&flag)
    }
}

fn request_image(gl: &GL, texture: &WebGlTexture, flag: FlagTexture) -> Result<()> {
    let image = HtmlImageElement::new()?;

    let onload = {
        let gl = gl.clone();
        let texture = texture.clone();
        let image = image.clone();
        Closure::wrap(Box::new(move || match upload(&gl, &texture, &image) {
            Ok(()) => log::info!("loaded texture {} ({}x{})", flag, image.natural_width(), image.natural_height()),
            Err(err) => log::warn!("uploading texture {flag} failed: {err}"),
        }) as Box<dyn FnMut()>)
    };
    let onerror = Closure::wrap(Box::new(move || {
        log::warn!("texture {} could not be loaded from {}", flag, flag.path());
    }) as Box<dyn FnMut()>);

    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    image.set_src(flag.path());
    Ok(())
}

fn upload(gl: &GL, texture: &WebGlTexture, image: &HtmlImageElement) -> Result<()> {
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    let result = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    );
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
    result?;

    gl.generate_mipmap(GL::TEXTURE_2D);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.bind_texture(GL::TEXTURE_2D, None);
    Ok(())
}
