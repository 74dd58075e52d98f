//! Colorimetric reference data
//!
//! CIE 1931 2° standard observer chromaticities of the spectral locus and the
//! Forel-Ule color scale used to classify water color.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Equal-energy white point (x, y).
pub const WHITE_POINT: (f64, f64) = (1.0 / 3.0, 1.0 / 3.0);

/// Visible range covered by the hue table (nm)
pub const LOCUS_MIN_NM: u32 = 380;
pub const LOCUS_MAX_NM: u32 = 700;

/// Spectral locus chromaticity (x, y) at 1 nm steps, 380 to 700 nm.
/// CIE 1931 2° standard observer. The 5 nm color-matching functions are
/// Sprague interpolated to 1 nm (CIE 167:2005) and then projected.
pub static CIE1931_LOCUS: LazyLock<BTreeMap<u32, (f64, f64)>> = LazyLock::new(|| {
    BTreeMap::from([
        (380, (0.17411, 0.00496)),
        (381, (0.17410, 0.00498)),
        (382, (0.17408, 0.00499)),
        (383, (0.17406, 0.00500)),
        (384, (0.17404, 0.00500)),
        (385, (0.17401, 0.00498)),
        (386, (0.17397, 0.00496)),
        (387, (0.17393, 0.00494)),
        (388, (0.17389, 0.00492)),
        (389, (0.17384, 0.00491)),
        (390, (0.17380, 0.00492)),
        (391, (0.17375, 0.00492)),
        (392, (0.17371, 0.00494)),
        (393, (0.17365, 0.00495)),
        (394, (0.17361, 0.00494)),
        (395, (0.17356, 0.00492)),
        (396, (0.17352, 0.00490)),
        (397, (0.17347, 0.00487)),
        (398, (0.17342, 0.00484)),
        (399, (0.17338, 0.00481)),
        (400, (0.17334, 0.00480)),
        (401, (0.17329, 0.00479)),
        (402, (0.17324, 0.00478)),
        (403, (0.17317, 0.00478)),
        (404, (0.17310, 0.00477)),
        (405, (0.17302, 0.00478)),
        (406, (0.17294, 0.00478)),
        (407, (0.17284, 0.00479)),
        (408, (0.17275, 0.00480)),
        (409, (0.17266, 0.00480)),
        (410, (0.17258, 0.00480)),
        (411, (0.17249, 0.00480)),
        (412, (0.17239, 0.00480)),
        (413, (0.17229, 0.00481)),
        (414, (0.17219, 0.00482)),
        (415, (0.17209, 0.00483)),
        (416, (0.17198, 0.00486)),
        (417, (0.17187, 0.00489)),
        (418, (0.17174, 0.00494)),
        (419, (0.17159, 0.00501)),
        (420, (0.17141, 0.00510)),
        (421, (0.17121, 0.00521)),
        (422, (0.17099, 0.00533)),
        (423, (0.17077, 0.00547)),
        (424, (0.17054, 0.00562)),
        (425, (0.17030, 0.00579)),
        (426, (0.17005, 0.00597)),
        (427, (0.16979, 0.00618)),
        (428, (0.16951, 0.00640)),
        (429, (0.16920, 0.00664)),
        (430, (0.16888, 0.00690)),
        (431, (0.16853, 0.00718)),
        (432, (0.16815, 0.00749)),
        (433, (0.16775, 0.00782)),
        (434, (0.16733, 0.00818)),
        (435, (0.16690, 0.00856)),
        (436, (0.16645, 0.00896)),
        (437, (0.16598, 0.00940)),
        (438, (0.16548, 0.00987)),
        (439, (0.16496, 0.01035)),
        (440, (0.16441, 0.01086)),
        (441, (0.16383, 0.01139)),
        (442, (0.16321, 0.01194)),
        (443, (0.16255, 0.01252)),
        (444, (0.16185, 0.01314)),
        (445, (0.16110, 0.01379)),
        (446, (0.16031, 0.01449)),
        (447, (0.15947, 0.01523)),
        (448, (0.15857, 0.01602)),
        (449, (0.15763, 0.01684)),
        (450, (0.15664, 0.01770)),
        (451, (0.15560, 0.01861)),
        (452, (0.15452, 0.01956)),
        (453, (0.15340, 0.02055)),
        (454, (0.15222, 0.02161)),
        (455, (0.15099, 0.02274)),
        (456, (0.14969, 0.02395)),
        (457, (0.14834, 0.02525)),
        (458, (0.14693, 0.02664)),
        (459, (0.14547, 0.02812)),
        (460, (0.14396, 0.02970)),
        (461, (0.14240, 0.03140)),
        (462, (0.14079, 0.03322)),
        (463, (0.13912, 0.03519)),
        (464, (0.13737, 0.03740)),
        (465, (0.13550, 0.03988)),
        (466, (0.13351, 0.04268)),
        (467, (0.13137, 0.04587)),
        (468, (0.12908, 0.04945)),
        (469, (0.12666, 0.05344)),
        (470, (0.12412, 0.05780)),
        (471, (0.12146, 0.06259)),
        (472, (0.11869, 0.06784)),
        (473, (0.11581, 0.07358)),
        (474, (0.11278, 0.07989)),
        (475, (0.10959, 0.08684)),
        (476, (0.10626, 0.09448)),
        (477, (0.10277, 0.10286)),
        (478, (0.09913, 0.11202)),
        (479, (0.09531, 0.12195)),
        (480, (0.09129, 0.13270)),
        (481, (0.08709, 0.14432)),
        (482, (0.08268, 0.15688)),
        (483, (0.07811, 0.17043)),
        (484, (0.07343, 0.18504)),
        (485, (0.06871, 0.20072)),
        (486, (0.06398, 0.21748)),
        (487, (0.05930, 0.23527)),
        (488, (0.05467, 0.25409)),
        (489, (0.05004, 0.27399)),
        (490, (0.04539, 0.29498)),
        (491, (0.04076, 0.31697)),
        (492, (0.03620, 0.33990)),
        (493, (0.03176, 0.36361)),
        (494, (0.02749, 0.38793)),
        (495, (0.02346, 0.41270)),
        (496, (0.01970, 0.43777)),
        (497, (0.01627, 0.46296)),
        (498, (0.01319, 0.48819)),
        (499, (0.01048, 0.51338)),
        (500, (0.00817, 0.53842)),
        (501, (0.00629, 0.56307)),
        (502, (0.00488, 0.58710)),
        (503, (0.00399, 0.61041)),
        (504, (0.00364, 0.63298)),
        (505, (0.00386, 0.65482)),
        (506, (0.00465, 0.67587)),
        (507, (0.00602, 0.69608)),
        (508, (0.00798, 0.71533)),
        (509, (0.01060, 0.73342)),
        (510, (0.01387, 0.75019)),
        (511, (0.01777, 0.76559)),
        (512, (0.02224, 0.77962)),
        (513, (0.02726, 0.79213)),
        (514, (0.03281, 0.80295)),
        (515, (0.03885, 0.81202)),
        (516, (0.04532, 0.81940)),
        (517, (0.05217, 0.82519)),
        (518, (0.05932, 0.82945)),
        (519, (0.06672, 0.83229)),
        (520, (0.07430, 0.83380)),
        (521, (0.08205, 0.83411)),
        (522, (0.08994, 0.83331)),
        (523, (0.09793, 0.83159)),
        (524, (0.10602, 0.82916)),
        (525, (0.11416, 0.82621)),
        (526, (0.12234, 0.82277)),
        (527, (0.13054, 0.81892)),
        (528, (0.13871, 0.81476)),
        (529, (0.14678, 0.81038)),
        (530, (0.15472, 0.80586)),
        (531, (0.16254, 0.80123)),
        (532, (0.17024, 0.79651)),
        (533, (0.17785, 0.79169)),
        (534, (0.18539, 0.78673)),
        (535, (0.19288, 0.78163)),
        (536, (0.20031, 0.77640)),
        (537, (0.20769, 0.77105)),
        (538, (0.21503, 0.76560)),
        (539, (0.22234, 0.76002)),
        (540, (0.22962, 0.75433)),
        (541, (0.23688, 0.74853)),
        (542, (0.24413, 0.74261)),
        (543, (0.25136, 0.73660)),
        (544, (0.25858, 0.73051)),
        (545, (0.26578, 0.72432)),
        (546, (0.27296, 0.71806)),
        (547, (0.28013, 0.71173)),
        (548, (0.28729, 0.70532)),
        (549, (0.29445, 0.69885)),
        (550, (0.30160, 0.69231)),
        (551, (0.30876, 0.68571)),
        (552, (0.31591, 0.67907)),
        (553, (0.32306, 0.67237)),
        (554, (0.33021, 0.66563)),
        (555, (0.33736, 0.65885)),
        (556, (0.34452, 0.65203)),
        (557, (0.35167, 0.64517)),
        (558, (0.35882, 0.63829)),
        (559, (0.36596, 0.63138)),
        (560, (0.37310, 0.62445)),
        (561, (0.38024, 0.61751)),
        (562, (0.38737, 0.61055)),
        (563, (0.39450, 0.60358)),
        (564, (0.40162, 0.59659)),
        (565, (0.40874, 0.58961)),
        (566, (0.41584, 0.58262)),
        (567, (0.42292, 0.57563)),
        (568, (0.42999, 0.56865)),
        (569, (0.43704, 0.56168)),
        (570, (0.44406, 0.55471)),
        (571, (0.45106, 0.54777)),
        (572, (0.45804, 0.54084)),
        (573, (0.46499, 0.53393)),
        (574, (0.47190, 0.52705)),
        (575, (0.47877, 0.52020)),
        (576, (0.48561, 0.51339)),
        (577, (0.49240, 0.50662)),
        (578, (0.49915, 0.49989)),
        (579, (0.50585, 0.49321)),
        (580, (0.51249, 0.48659)),
        (581, (0.51907, 0.48003)),
        (582, (0.52560, 0.47353)),
        (583, (0.53207, 0.46709)),
        (584, (0.53846, 0.46072)),
        (585, (0.54479, 0.45443)),
        (586, (0.55103, 0.44822)),
        (587, (0.55719, 0.44210)),
        (588, (0.56327, 0.43606)),
        (589, (0.56926, 0.43010)),
        (590, (0.57515, 0.42423)),
        (591, (0.58095, 0.41845)),
        (592, (0.58665, 0.41276)),
        (593, (0.59223, 0.40718)),
        (594, (0.59766, 0.40176)),
        (595, (0.60293, 0.39650)),
        (596, (0.60804, 0.39140)),
        (597, (0.61298, 0.38648)),
        (598, (0.61778, 0.38171)),
        (599, (0.62245, 0.37705)),
        (600, (0.62704, 0.37249)),
        (601, (0.63152, 0.36803)),
        (602, (0.63590, 0.36367)),
        (603, (0.64016, 0.35942)),
        (604, (0.64428, 0.35533)),
        (605, (0.64823, 0.35139)),
        (606, (0.65203, 0.34762)),
        (607, (0.65567, 0.34401)),
        (608, (0.65917, 0.34055)),
        (609, (0.66253, 0.33722)),
        (610, (0.66576, 0.33401)),
        (611, (0.66887, 0.33092)),
        (612, (0.67186, 0.32795)),
        (613, (0.67472, 0.32509)),
        (614, (0.67746, 0.32236)),
        (615, (0.68008, 0.31975)),
        (616, (0.68258, 0.31725)),
        (617, (0.68497, 0.31486)),
        (618, (0.68725, 0.31259)),
        (619, (0.68943, 0.31041)),
        (620, (0.69150, 0.30834)),
        (621, (0.69349, 0.30637)),
        (622, (0.69539, 0.30448)),
        (623, (0.69721, 0.30267)),
        (624, (0.69894, 0.30095)),
        (625, (0.70061, 0.29930)),
        (626, (0.70219, 0.29772)),
        (627, (0.70371, 0.29622)),
        (628, (0.70516, 0.29477)),
        (629, (0.70656, 0.29338)),
        (630, (0.70792, 0.29203)),
        (631, (0.70923, 0.29072)),
        (632, (0.71050, 0.28945)),
        (633, (0.71172, 0.28823)),
        (634, (0.71290, 0.28706)),
        (635, (0.71403, 0.28593)),
        (636, (0.71512, 0.28485)),
        (637, (0.71616, 0.28381)),
        (638, (0.71716, 0.28281)),
        (639, (0.71812, 0.28185)),
        (640, (0.71903, 0.28093)),
        (641, (0.71991, 0.28006)),
        (642, (0.72075, 0.27922)),
        (643, (0.72155, 0.27842)),
        (644, (0.72232, 0.27766)),
        (645, (0.72303, 0.27695)),
        (646, (0.72370, 0.27628)),
        (647, (0.72433, 0.27566)),
        (648, (0.72491, 0.27508)),
        (649, (0.72547, 0.27453)),
        (650, (0.72599, 0.27401)),
        (651, (0.72649, 0.27351)),
        (652, (0.72697, 0.27303)),
        (653, (0.72743, 0.27257)),
        (654, (0.72786, 0.27214)),
        (655, (0.72827, 0.27173)),
        (656, (0.72866, 0.27134)),
        (657, (0.72902, 0.27098)),
        (658, (0.72936, 0.27064)),
        (659, (0.72968, 0.27032)),
        (660, (0.72997, 0.27003)),
        (661, (0.73023, 0.26977)),
        (662, (0.73047, 0.26953)),
        (663, (0.73069, 0.26931)),
        (664, (0.73089, 0.26911)),
        (665, (0.73109, 0.26891)),
        (666, (0.73128, 0.26872)),
        (667, (0.73146, 0.26854)),
        (668, (0.73165, 0.26835)),
        (669, (0.73183, 0.26817)),
        (670, (0.73199, 0.26801)),
        (671, (0.73215, 0.26785)),
        (672, (0.73230, 0.26770)),
        (673, (0.73244, 0.26756)),
        (674, (0.73258, 0.26742)),
        (675, (0.73272, 0.26728)),
        (676, (0.73286, 0.26714)),
        (677, (0.73300, 0.26700)),
        (678, (0.73314, 0.26686)),
        (679, (0.73328, 0.26672)),
        (680, (0.73342, 0.26658)),
        (681, (0.73355, 0.26645)),
        (682, (0.73368, 0.26632)),
        (683, (0.73381, 0.26619)),
        (684, (0.73394, 0.26606)),
        (685, (0.73405, 0.26595)),
        (686, (0.73414, 0.26586)),
        (687, (0.73422, 0.26578)),
        (688, (0.73429, 0.26571)),
        (689, (0.73434, 0.26566)),
        (690, (0.73439, 0.26561)),
        (691, (0.73444, 0.26556)),
        (692, (0.73448, 0.26552)),
        (693, (0.73452, 0.26548)),
        (694, (0.73456, 0.26544)),
        (695, (0.73459, 0.26541)),
        (696, (0.73462, 0.26538)),
        (697, (0.73464, 0.26536)),
        (698, (0.73466, 0.26534)),
        (699, (0.73467, 0.26533)),
        (700, (0.73469, 0.26531)),
    ])
});

/// Tristimulus weights of (red, green, blue) reflectance for X, Y and Z.
/// Wang et al. (2015), MODIS-based radiometric color extraction and
/// classification of inland water with the Forel-Ule scale.
pub const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [2.7689, 1.7517, 1.1302],
    [1.0000, 4.5907, 0.0601],
    [0.0000, 0.0565, 5.5943],
];

/// Forel-Ule classes as (class, first nm, last nm, display color).
/// Wavelength ranges are inclusive and contiguous.
pub const FOREL_ULE_CLASSES: [(u8, u32, u32, &str); 21] = [
    (1, 471, 475, "#2158bc"),
    (2, 476, 480, "#316dc5"),
    (3, 481, 485, "#327cbb"),
    (4, 486, 489, "#4b80a0"),
    (5, 490, 495, "#568f96"),
    (6, 496, 509, "#6d9298"),
    (7, 510, 530, "#698c86"),
    (8, 531, 549, "#759e72"),
    (9, 550, 559, "#7ba654"),
    (10, 560, 565, "#7dae38"),
    (11, 566, 568, "#94b660"),
    (12, 569, 570, "#94b660"),
    (13, 571, 572, "#a5bc76"),
    (14, 573, 574, "#aab86d"),
    (15, 575, 576, "#adb55f"),
    (16, 577, 577, "#a8a965"),
    (17, 578, 578, "#ae9f5c"),
    (18, 579, 580, "#b3a053"),
    (19, 581, 581, "#af8a44"),
    (20, 582, 582, "#a46905"),
    (21, 583, 583, "#9f4d04"),
];
