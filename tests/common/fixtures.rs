//! Styling documents and introspection outputs.

/// GIBS colormap with red and green declared, everything else padded
pub const RED_GREEN_COLORMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ColorMaps>
  <ColorMap title="Test">
    <Entries>
      <ColorMapEntry rgb="255,0,0" transparent="false" sourceValue="[0,1)"/>
      <ColorMapEntry rgb="0,255,0" transparent="false" sourceValue="[1,2)"/>
    </Entries>
  </ColorMap>
</ColorMaps>
"#;

/// SLD document using hex colors and a group opacity
pub const SLD_COLORMAP: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<StyledLayerDescriptor xmlns="http://www.opengis.net/sld" xmlns:se="http://www.opengis.net/se">
  <NamedLayer>
    <UserStyle>
      <se:FeatureTypeStyle>
        <se:Rule>
          <se:RasterSymbolizer>
            <se:Opacity>1.0</se:Opacity>
            <ColorMap>
              <ColorMapEntry color="#FF0000" quantity="1"/>
              <ColorMapEntry color="#00FF00" quantity="2"/>
              <ColorMapEntry color="#000000" quantity="3" opacity="0"/>
            </ColorMap>
          </se:RasterSymbolizer>
        </se:Rule>
      </se:FeatureTypeStyle>
    </UserStyle>
  </NamedLayer>
</StyledLayerDescriptor>
"##;

/// gdalinfo-like output for a raster whose second color drifted to blue
pub const DRIFTED_RED_BLUE: &str = "Driver: PNG/Portable Network Graphics
Size is 256, 256
Band 1 Block=256x1 Type=Byte, ColorInterp=Palette
  Color Table (RGB with 2 entries)
    0: 255,0,0,255
    1: 0,0,255,255
";

/// gdalinfo-like output without a color table
pub const NO_COLOR_TABLE: &str = "Driver: GTiff/GeoTIFF
Size is 256, 256
Band 1 Block=256x32 Type=Byte, ColorInterp=Gray
";

/// Color table lines for `count` entries taken from `colors`, padded with
/// transparent black
pub fn color_table(colors: &[(u8, u8, u8, u8)], count: usize) -> String {
    let mut out = String::from("Band 1 Block=256x1 Type=Byte, ColorInterp=Palette\n");
    out.push_str(&format!("  Color Table (RGB with {} entries)\n", count));
    for i in 0..count {
        let (r, g, b, a) = colors.get(i).copied().unwrap_or((0, 0, 0, 0));
        out.push_str(&format!("    {}: {},{},{},{}\n", i, r, g, b, a));
    }
    out
}
