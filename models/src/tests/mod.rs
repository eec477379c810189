mod draft;
mod label_color;
